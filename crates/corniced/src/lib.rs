//! Control-plane daemon for the cornice panel.
//!
//! `corniced` owns the daemon side of the control socket: it binds the
//! well-known endpoint, accepts connections in the background, decodes the
//! fixed-layout wire protocol, and applies validated messages through the
//! [`dispatch::CommandExecutor`] effect interface. The panel's widgets,
//! mixer access, and compositor calls live behind that interface; nothing in
//! this crate touches them directly.
//!
//! Decode failures are contained per connection: an unknown discriminator or
//! a truncated payload drops the offending client with a warning while other
//! connections and the panel itself carry on.

mod bootstrap;
pub mod dispatch;
pub mod telemetry;
pub mod transport;

pub use bootstrap::{DaemonError, run, run_with_executor};
