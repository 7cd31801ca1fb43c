//! Shared configuration for the cornice control plane.
//!
//! Both `cornicectl` and `corniced` resolve the same configuration so they
//! agree on the socket endpoint identity and logging behaviour. Values layer
//! in precedence order: built-in defaults, the TOML configuration file,
//! `CORNICE_*` environment variables, then explicit CLI overrides.

mod defaults;
mod load;
mod logging;
mod socket;

pub use defaults::{DEFAULT_LOG_FILTER, SOCKET_FILE_NAME, default_socket_endpoint};
pub use load::{
    ConfigError, ConfigOverrides, ENV_CONFIG_FILE, ENV_LOG_FILTER, ENV_LOG_FORMAT, ENV_SOCKET,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use socket::{SocketEndpoint, SocketParseError, SocketPreparationError};

/// Resolved configuration shared by the CLI and the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Endpoint the daemon listens on and the CLI connects to.
    pub socket: SocketEndpoint,
    /// Log filter expression consumed by the tracing subscriber.
    pub log_filter: String,
    /// Output format for structured logs.
    pub log_format: LogFormat,
}

impl Config {
    /// The daemon socket endpoint.
    #[must_use]
    pub fn socket(&self) -> &SocketEndpoint {
        &self.socket
    }

    /// The log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// The log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socket: default_socket_endpoint(),
            log_filter: String::from(DEFAULT_LOG_FILTER),
            log_format: LogFormat::default(),
        }
    }
}
