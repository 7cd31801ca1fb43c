//! Connection handler that decodes and applies control messages.
//!
//! Each connection is served synchronously: read one discriminator byte,
//! size the payload read from the registered catalogue, decode, validate
//! ranges defensively, and hand the message to the executor. A connection
//! may carry any number of messages; the loop runs until the client closes.
//! Protocol violations drop the offending connection with a warning and
//! never propagate a fault to other connections or the panel itself.

use std::io::{self, Read};
use std::sync::Arc;

use tracing::{debug, warn};

use cornice_ipc::{HEADER_SIZE, Message, NightLightOn, ProtocolError, VolumeSet, descriptor_for};

use crate::transport::{ConnectionHandler, ConnectionStream};

use super::DISPATCH_TARGET;
use super::errors::DispatchError;
use super::executor::CommandExecutor;

/// Connection handler wiring the decode loop to an executor.
pub struct DecodeConnectionHandler {
    executor: Arc<dyn CommandExecutor>,
}

impl DecodeConnectionHandler {
    /// Creates a handler applying messages through `executor`.
    #[must_use]
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    fn serve(&self, stream: &mut ConnectionStream) {
        loop {
            let message = match read_message(stream) {
                Ok(Some(message)) => message,
                Ok(None) => {
                    debug!(target: DISPATCH_TARGET, "client closed the connection");
                    return;
                }
                Err(error) => {
                    warn!(
                        target: DISPATCH_TARGET,
                        error = %error,
                        "dropping connection"
                    );
                    return;
                }
            };

            if let Err(error) = validate(&message) {
                warn!(
                    target: DISPATCH_TARGET,
                    error = %error,
                    "dropping out-of-range message"
                );
                continue;
            }

            debug!(
                target: DISPATCH_TARGET,
                command = message.name(),
                "dispatching control message"
            );
            if let Err(error) = self.executor.apply(message) {
                warn!(
                    target: DISPATCH_TARGET,
                    error = %error,
                    "executor failed to apply message"
                );
            }
        }
    }
}

impl ConnectionHandler for DecodeConnectionHandler {
    fn handle(&self, mut stream: ConnectionStream) {
        self.serve(&mut stream);
    }
}

/// Reads one complete message frame from the stream.
///
/// Returns `Ok(None)` when the client closes cleanly between frames. A close
/// mid-frame is a truncated message, never an over-read: the payload length
/// comes from the registered catalogue, not from the client.
fn read_message(stream: &mut ConnectionStream) -> Result<Option<Message>, DispatchError> {
    let mut header = [0_u8; HEADER_SIZE];
    if read_full(stream, &mut header)? == 0 {
        return Ok(None);
    }
    let discriminator = header[0];
    let descriptor = descriptor_for(discriminator)
        .ok_or(ProtocolError::UnknownMessage { discriminator })?;

    let mut payload = vec![0_u8; descriptor.payload_size];
    let filled = read_full(stream, &mut payload)?;
    if filled < descriptor.payload_size {
        return Err(ProtocolError::Truncated {
            discriminator,
            expected: descriptor.payload_size,
            actual: filled,
        }
        .into());
    }

    descriptor
        .decode_payload(&payload)
        .map(Some)
        .map_err(DispatchError::from)
}

/// Fills `buffer` from the stream, returning how many bytes arrived before
/// end of stream. Interrupted reads are retried.
fn read_full(stream: &mut ConnectionStream, buffer: &mut [u8]) -> Result<usize, DispatchError> {
    let mut filled = 0;
    while filled < buffer.len() {
        match stream.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(DispatchError::Read(error)),
        }
    }
    Ok(filled)
}

/// Defensive range validation before any effect is applied.
///
/// Senders bound these values before encoding; re-checking here protects the
/// panel from foreign or buggy clients.
fn validate(message: &Message) -> Result<(), DispatchError> {
    match message {
        Message::VolumeSet(set) if !VolumeSet::RANGE.contains(&set.level) => {
            Err(DispatchError::out_of_range(message.name(), set.level))
        }
        Message::NightLightOn(on)
            if !NightLightOn::TEMPERATURE_RANGE.contains(&on.temperature) =>
        {
            Err(DispatchError::out_of_range(message.name(), on.temperature))
        }
        _ => Ok(()),
    }
}
