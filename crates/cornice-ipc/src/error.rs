//! Decode failures for the wire protocol.

use thiserror::Error;

/// Errors raised while decoding a wire message.
///
/// Every variant is a protocol violation by the sender; the receiver drops
/// the offending request and carries on serving other connections.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// The input ended before a discriminator byte could be read.
    #[error("message is empty; expected a discriminator header")]
    MissingHeader,
    /// The discriminator does not match any registered message type.
    #[error("unknown message discriminator 0x{discriminator:02x}")]
    UnknownMessage {
        /// The unrecognised discriminator byte.
        discriminator: u8,
    },
    /// Fewer payload bytes were available than the discriminator implies.
    #[error(
        "truncated payload for discriminator 0x{discriminator:02x}: \
         expected {expected} bytes, got {actual}"
    )]
    Truncated {
        /// Discriminator of the affected message.
        discriminator: u8,
        /// Payload size the discriminator implies.
        expected: usize,
        /// Payload bytes actually available.
        actual: usize,
    },
    /// More bytes were supplied than the discriminator implies.
    ///
    /// Message size is a pure function of the discriminator, so surplus input
    /// means the sender and receiver disagree about the protocol.
    #[error("unexpected trailing bytes after discriminator 0x{discriminator:02x}: {extra} extra")]
    TrailingBytes {
        /// Discriminator of the affected message.
        discriminator: u8,
        /// Number of surplus bytes.
        extra: usize,
    },
}
