//! Decode loop and effect dispatch for the control socket.
//!
//! The dispatch layer turns accepted connections into validated
//! [`cornice_ipc::Message`] values and applies them through the
//! [`CommandExecutor`] effect interface. Payload sizes always come from the
//! registered catalogue, never from the client, so a malicious peer can
//! neither oversize a read nor desynchronise other connections.

mod errors;
mod executor;
mod handler;

pub use self::errors::DispatchError;
pub use self::executor::{CommandExecutor, ExecutorError, TracingExecutor};
pub use self::handler::DecodeConnectionHandler;

const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
