//! Error types for the CLI runtime.
//!
//! Every failure funnels to the entry point in `lib.rs`, which is the single
//! place that converts errors into process exit status and human-readable
//! text. Usage-class failures are resolved locally and never reach the
//! transport; connection and send failures surface the endpoint and the
//! underlying OS reason.

use std::io;

use thiserror::Error;

use crate::cmd_tree::{CommandTreeError, DispatchError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(#[from] cornice_config::ConfigError),
    #[error("{0}")]
    Tree(#[from] CommandTreeError),
    /// Malformed or out-of-range command input; printed verbatim to stdout.
    #[error("{message}")]
    Usage { message: String },
    /// A token matched no command; printed as a usage line to stdout.
    #[error("unknown command '{token}'")]
    UnknownCommand { token: String },
    #[error("failed to connect to daemon at {endpoint}: {source}")]
    Connect { endpoint: String, source: io::Error },
    #[cfg(not(unix))]
    #[error("platform does not support Unix sockets: {0}")]
    UnsupportedUnixTransport(String),
    #[error("failed to send request to daemon: {0}")]
    Send(#[source] io::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] io::Error),
}

impl AppError {
    /// Builds a usage error from its display text.
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Whether this error is resolved locally by printing guidance.
    ///
    /// Usage-class errors go to stdout; everything else is an operational
    /// failure reported on stderr.
    pub(crate) const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. } | Self::UnknownCommand { .. })
    }
}

impl From<DispatchError<AppError>> for AppError {
    fn from(error: DispatchError<AppError>) -> Self {
        match error {
            DispatchError::UnknownCommand { token } => Self::UnknownCommand { token },
            DispatchError::Write(source) => Self::WriteOutput(source),
            DispatchError::Handler(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_are_usage_class() {
        assert!(AppError::usage("Usage: cornicectl volume set <level>").is_usage());
        assert!(
            AppError::UnknownCommand {
                token: String::from("bogus"),
            }
            .is_usage()
        );
    }

    #[test]
    fn transport_errors_are_not_usage_class() {
        let error = AppError::Connect {
            endpoint: String::from("/run/user/1000/cornice/cornice.sock"),
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        };
        assert!(!error.is_usage());
    }

    #[test]
    fn dispatch_unknown_command_converts() {
        let error = AppError::from(DispatchError::<AppError>::UnknownCommand {
            token: String::from("bogus"),
        });
        assert!(matches!(error, AppError::UnknownCommand { token } if token == "bogus"));
    }
}
