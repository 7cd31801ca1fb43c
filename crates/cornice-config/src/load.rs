//! Layered configuration loading.
//!
//! Values resolve in precedence order: built-in defaults, then the TOML
//! configuration file, then `CORNICE_*` environment variables, then explicit
//! overrides supplied by the caller (normally CLI flags). Later layers win.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::logging::LogFormat;
use crate::socket::{SocketEndpoint, SocketParseError};
use crate::{Config, LogFormatParseError};

/// Environment variable naming the socket path.
pub const ENV_SOCKET: &str = "CORNICE_SOCKET";
/// Environment variable naming the log filter expression.
pub const ENV_LOG_FILTER: &str = "CORNICE_LOG_FILTER";
/// Environment variable naming the log output format.
pub const ENV_LOG_FORMAT: &str = "CORNICE_LOG_FORMAT";
/// Environment variable pointing at an alternative configuration file.
pub const ENV_CONFIG_FILE: &str = "CORNICE_CONFIG";

/// Explicit overrides applied after every other layer.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Socket path override, usually from a `--socket` flag.
    pub socket: Option<SocketEndpoint>,
    /// Log filter override, usually from a `--log-filter` flag.
    pub log_filter: Option<String>,
    /// Log format override, usually from a `--log-format` flag.
    pub log_format: Option<LogFormat>,
}

/// Partial configuration as read from the TOML file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    socket: Option<SocketEndpoint>,
    log_filter: Option<String>,
    log_format: Option<LogFormat>,
}

/// Partial configuration gathered from the environment.
#[derive(Debug, Default)]
struct EnvLayer {
    socket: Option<SocketEndpoint>,
    log_filter: Option<String>,
    log_format: Option<LogFormat>,
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed for a reason other than absence.
    #[error("failed to read configuration file '{path}': {source}")]
    ReadFile {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for the expected schema.
    #[error("failed to parse configuration file '{path}': {source}")]
    ParseFile {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
    /// A socket value from the environment failed to parse.
    #[error("invalid socket path in {name}: {source}")]
    InvalidSocket {
        /// Environment variable carrying the value.
        name: &'static str,
        /// Underlying parse error.
        #[source]
        source: SocketParseError,
    },
    /// A log format value from the environment failed to parse.
    #[error("invalid log format '{value}' in {name}")]
    InvalidLogFormat {
        /// Environment variable carrying the value.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Underlying parse error.
        #[source]
        source: LogFormatParseError,
    },
    /// An environment variable held non-UTF-8 data.
    #[error("environment variable {name} is not valid unicode")]
    EnvNotUnicode {
        /// Name of the offending variable.
        name: &'static str,
    },
}

impl Config {
    /// Loads configuration from the file, environment, and explicit overrides.
    ///
    /// A missing configuration file is not an error; every other failure is
    /// reported rather than silently falling back to defaults.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let file = read_config_file()?;
        let env_layer = read_environment()?;
        Ok(resolve(file, env_layer, overrides))
    }
}

/// Merges the configuration layers in precedence order.
fn resolve(file: ConfigFile, env_layer: EnvLayer, overrides: &ConfigOverrides) -> Config {
    let mut config = Config::default();
    apply(&mut config, file.socket, file.log_filter, file.log_format);
    apply(
        &mut config,
        env_layer.socket,
        env_layer.log_filter,
        env_layer.log_format,
    );
    apply(
        &mut config,
        overrides.socket.clone(),
        overrides.log_filter.clone(),
        overrides.log_format,
    );
    config
}

fn apply(
    config: &mut Config,
    socket: Option<SocketEndpoint>,
    log_filter: Option<String>,
    log_format: Option<LogFormat>,
) {
    if let Some(socket) = socket {
        config.socket = socket;
    }
    if let Some(log_filter) = log_filter {
        config.log_filter = log_filter;
    }
    if let Some(log_format) = log_format {
        config.log_format = log_format;
    }
}

fn read_config_file() -> Result<ConfigFile, ConfigError> {
    let Some(path) = config_file_path() else {
        return Ok(ConfigFile::default());
    };
    parse_config_file(&path)
}

fn parse_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ConfigFile::default());
        }
        Err(source) => {
            return Err(ConfigError::ReadFile {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&contents).map_err(|source| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Locates the configuration file.
///
/// `CORNICE_CONFIG` takes precedence; otherwise the file lives at
/// `$XDG_CONFIG_HOME/cornice/config.toml`.
fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(ENV_CONFIG_FILE) {
        return Some(PathBuf::from(path));
    }

    #[cfg(unix)]
    {
        dirs::config_dir().map(|mut dir| {
            dir.push("cornice");
            dir.push("config.toml");
            dir
        })
    }

    #[cfg(not(unix))]
    {
        None
    }
}

fn read_environment() -> Result<EnvLayer, ConfigError> {
    let socket = match env_value(ENV_SOCKET)? {
        Some(value) => Some(
            SocketEndpoint::from_str(&value)
                .map_err(|source| ConfigError::InvalidSocket {
                    name: ENV_SOCKET,
                    source,
                })?,
        ),
        None => None,
    };
    let log_format = match env_value(ENV_LOG_FORMAT)? {
        Some(value) => Some(LogFormat::from_str(&value).map_err(|source| {
            ConfigError::InvalidLogFormat {
                name: ENV_LOG_FORMAT,
                value,
                source,
            }
        })?),
        None => None,
    };

    Ok(EnvLayer {
        socket,
        log_filter: env_value(ENV_LOG_FILTER)?,
        log_format,
    })
}

fn env_value(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::EnvNotUnicode { name }),
    }
}
