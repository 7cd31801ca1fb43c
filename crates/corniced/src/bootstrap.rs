//! Daemon bootstrap orchestration.
//!
//! The bootstrap sequence loads configuration, initialises structured
//! telemetry, prepares the socket filesystem, binds the listener, and then
//! parks the main thread until a shutdown signal arrives. Each stage fails
//! with a typed error that the binary entrypoint reports before exiting
//! non-zero.

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tracing::info;

use cornice_config::{
    Config, ConfigError, ConfigOverrides, LogFormat, SocketEndpoint, SocketPreparationError,
};

use crate::dispatch::{CommandExecutor, DecodeConnectionHandler, TracingExecutor};
use crate::telemetry::{self, TelemetryError};
use crate::transport::{ListenerError, SocketListener};

const BOOTSTRAP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::bootstrap");

#[derive(Parser, Debug)]
#[command(name = "corniced", disable_help_subcommand = true)]
struct Cli {
    /// Path of the control socket to listen on.
    #[arg(long, value_name = "PATH")]
    socket: Option<SocketEndpoint>,
    /// Log filter expression (overrides configuration).
    #[arg(long, value_name = "FILTER")]
    log_filter: Option<String>,
    /// Log output format (overrides configuration).
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,
}

/// Errors surfaced during daemon startup and shutdown.
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Command-line arguments were malformed.
    #[error("{0}")]
    CliUsage(clap::Error),
    /// Configuration failed to load.
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] ConfigError),
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    /// Socket directory preparation failed.
    #[error("failed to prepare daemon socket: {0}")]
    Socket(#[from] SocketPreparationError),
    /// The listener could not be bound or joined.
    #[error("control socket listener failed: {0}")]
    Listener(#[from] ListenerError),
    /// Installing the shutdown signal handler failed.
    #[error("failed to install signal handler: {0}")]
    Signals(#[source] std::io::Error),
}

/// Runs the daemon until a shutdown signal arrives.
///
/// The standalone binary applies messages through [`TracingExecutor`]; the
/// panel process calls [`run_with_executor`] with its own implementation.
pub fn run<I>(args: I) -> Result<(), DaemonError>
where
    I: IntoIterator<Item = OsString>,
{
    run_with_executor(args, Arc::new(TracingExecutor))
}

/// Runs the daemon with the supplied effect executor.
pub fn run_with_executor<I>(
    args: I,
    executor: Arc<dyn CommandExecutor>,
) -> Result<(), DaemonError>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = Cli::try_parse_from(args).map_err(DaemonError::CliUsage)?;
    let overrides = ConfigOverrides {
        socket: cli.socket,
        log_filter: cli.log_filter,
        log_format: cli.log_format,
    };
    let config = Config::load(&overrides)?;

    let _telemetry = telemetry::initialise(&config)?;
    config.socket().prepare_filesystem()?;

    let listener = SocketListener::bind(config.socket())?;
    let handler = Arc::new(DecodeConnectionHandler::new(executor));
    let handle = listener.start(handler)?;
    info!(
        target: BOOTSTRAP_TARGET,
        endpoint = %config.socket(),
        "corniced accepting control connections"
    );

    wait_for_shutdown()?;
    handle.shutdown();
    handle.join()?;
    info!(target: BOOTSTRAP_TARGET, "corniced stopped");
    Ok(())
}

/// Blocks until SIGINT or SIGTERM is delivered.
fn wait_for_shutdown() -> Result<(), DaemonError> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(DaemonError::Signals)?;
    if let Some(signal) = signals.forever().next() {
        info!(
            target: BOOTSTRAP_TARGET,
            signal,
            "shutdown signal received"
        );
    }
    Ok(())
}
