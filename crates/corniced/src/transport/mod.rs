//! Socket listener for the daemon's control endpoint.
//!
//! The transport module binds the well-known Unix socket and accepts
//! connections in a background thread, handing each accepted stream to a
//! [`ConnectionHandler`]. Framing and decoding live one layer up in
//! `dispatch`; this layer only moves bytes and owns the socket lifecycle.

mod errors;
mod handler;
mod listener;

pub use self::errors::ListenerError;
pub use self::handler::{ConnectionHandler, ConnectionStream};
pub use self::listener::{ListenerHandle, SocketListener};

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
