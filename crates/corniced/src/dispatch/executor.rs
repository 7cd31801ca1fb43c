//! The effect interface decoded messages are applied through.
//!
//! Everything downstream of a validated message (mixer access, gamma
//! control, tray widgets) lives behind [`CommandExecutor`]. The panel
//! process embeds the listener with its own executor; the standalone
//! `corniced` binary wires [`TracingExecutor`], which records each applied
//! command without touching system state.

use thiserror::Error;

use cornice_ipc::Message;

use tracing::info;

const EXECUTOR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::executor");

/// Errors reported by an executor while applying a message.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The effect could not be applied to live system state.
    #[error("failed to apply {name}: {reason}")]
    Apply {
        /// Registered name of the affected message.
        name: &'static str,
        /// Executor-specific failure description.
        reason: String,
    },
}

impl ExecutorError {
    /// Builds an apply failure for `message`.
    #[must_use]
    pub fn apply(message: &Message, reason: impl Into<String>) -> Self {
        Self::Apply {
            name: message.name(),
            reason: reason.into(),
        }
    }
}

/// Applies decoded control messages to live system state.
///
/// Implementations receive messages that already passed protocol decoding
/// and the dispatch layer's defensive range checks; they may still reject a
/// message when the underlying effect fails.
pub trait CommandExecutor: Send + Sync + 'static {
    /// Applies one decoded message.
    fn apply(&self, message: Message) -> Result<(), ExecutorError>;
}

/// Executor that records each applied command through tracing.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingExecutor;

impl CommandExecutor for TracingExecutor {
    fn apply(&self, message: Message) -> Result<(), ExecutorError> {
        match message {
            Message::VolumeSet(set) => {
                info!(
                    target: EXECUTOR_TARGET,
                    command = message.name(),
                    level = set.level,
                    "applying control message"
                );
            }
            Message::NightLightOn(on) => {
                info!(
                    target: EXECUTOR_TARGET,
                    command = message.name(),
                    temperature = on.temperature,
                    "applying control message"
                );
            }
            _ => {
                info!(
                    target: EXECUTOR_TARGET,
                    command = message.name(),
                    "applying control message"
                );
            }
        }
        Ok(())
    }
}
