//! Error types for socket listener operations.

use std::io;

use thiserror::Error;

/// Errors surfaced while binding or running the socket listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The socket path could not be bound.
    #[error("failed to bind unix listener at {path}: {source}")]
    Bind {
        /// Offending socket path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Another daemon is already serving the socket.
    #[error("existing unix socket {path} is already in use")]
    InUse {
        /// Offending socket path.
        path: String,
    },
    /// The configured path exists but is not a socket.
    #[error("unix socket path {path} is not a socket")]
    NotSocket {
        /// Offending path.
        path: String,
    },
    /// Metadata for an existing socket path could not be read.
    #[error("failed to read metadata for unix socket {path}: {source}")]
    Metadata {
        /// Offending socket path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Probing an existing socket for liveness failed.
    #[error("failed to connect to existing unix socket {path}: {source}")]
    Probe {
        /// Offending socket path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// A stale socket file could not be removed.
    #[error("failed to remove stale unix socket {path}: {source}")]
    Cleanup {
        /// Offending socket path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The listener could not be switched to non-blocking accepts.
    #[error("failed to enable non-blocking listener: {source}")]
    NonBlocking {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The accept-loop thread panicked.
    #[error("listener thread panicked")]
    ThreadPanic,
}
