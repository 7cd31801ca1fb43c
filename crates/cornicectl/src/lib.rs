//! Command-line control client for the cornice panel daemon.
//!
//! The runtime parses the global configuration flags, resolves the remaining
//! tokens against the command tree, and lets the resolved handler construct
//! and deliver a wire message through the client transport context. Each
//! invocation is a single synchronous unit of work: parse, traverse,
//! optionally connect and send, exit. The interface is exercised both from
//! the binary entrypoint and from tests where IO streams are substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use cornice_config::{Config, ConfigOverrides, SocketEndpoint};

pub mod cmd_tree;
mod commands;
mod context;
mod errors;
mod transport;

pub use cmd_tree::{CommandNode, CommandTreeError, DispatchError, DispatchOutcome, dispatch};
pub use context::ControlContext;
pub use errors::AppError;

#[derive(Parser, Debug)]
#[command(name = "cornicectl", disable_help_subcommand = true)]
struct Cli {
    /// Path of the daemon control socket.
    #[arg(long, value_name = "PATH")]
    socket: Option<SocketEndpoint>,
    /// Command tokens resolved against the command tree.
    #[arg(
        value_name = "COMMAND",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    tokens: Vec<String>,
}

/// Runs the CLI using the provided arguments and IO handles.
///
/// Usage-class failures print guidance on stdout; operational failures print
/// the error chain on stderr. Either way the process exits non-zero, and a
/// transport failure means the command was not delivered.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    match try_run(args, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) if error.is_usage() => {
            let line = match &error {
                AppError::UnknownCommand { .. } => format!("Usage: {error}"),
                _ => error.to_string(),
            };
            let _ = writeln!(stdout, "{line}");
            ExitCode::FAILURE
        }
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn try_run<I, W>(args: I, stdout: &mut W) -> Result<(), AppError>
where
    I: IntoIterator<Item = OsString>,
    W: Write,
{
    let cli = Cli::try_parse_from(args).map_err(AppError::CliUsage)?;
    let overrides = ConfigOverrides {
        socket: cli.socket.clone(),
        ..ConfigOverrides::default()
    };
    let config = Config::load(&overrides)?;

    let tree = commands::control_tree()?;
    let mut context = ControlContext::new(config.socket.clone());
    cmd_tree::dispatch(&tree, &cli.tokens, &mut context, stdout)?;
    Ok(())
}
