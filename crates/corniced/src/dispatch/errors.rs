//! Error types for the decode loop.

use std::io;

use thiserror::Error;

use cornice_ipc::ProtocolError;

use super::executor::ExecutorError;

/// Errors surfaced while reading, decoding, or applying a control message.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The client violated the wire protocol.
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolError),
    /// Reading from the connection failed.
    #[error("failed to read from connection: {0}")]
    Read(#[source] io::Error),
    /// A semantically out-of-range payload was received.
    ///
    /// The sending handler bounds these before encoding, so an out-of-range
    /// value here means a foreign or buggy client; the message is dropped.
    #[error("{name} payload out of range: {value}")]
    OutOfRange {
        /// Registered name of the affected message.
        name: &'static str,
        /// Display form of the rejected value.
        value: String,
    },
    /// The executor failed to apply a valid message.
    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

impl DispatchError {
    /// Builds an out-of-range rejection.
    #[must_use]
    pub fn out_of_range(name: &'static str, value: impl ToString) -> Self {
        Self::OutOfRange {
            name,
            value: value.to_string(),
        }
    }
}
