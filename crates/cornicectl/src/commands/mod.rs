//! The control command tree and its leaf handlers.
//!
//! Each submodule contributes one top-level command group; the tree is
//! assembled once per invocation and handed to the dispatcher. Handlers
//! validate their own arguments before constructing a wire message, so
//! nothing malformed ever reaches the transport.

mod message_tray;
mod night_light;
mod quick_settings;
mod volume;

use crate::cmd_tree::{CommandNode, CommandTreeError};
use crate::context::ControlContext;
use crate::errors::AppError;

/// Command-tree node specialised to the control client.
pub(crate) type ControlNode = CommandNode<ControlContext, AppError>;

/// Builds the full control tree.
pub(crate) fn control_tree() -> Result<ControlNode, CommandTreeError> {
    ControlNode::group("cornicectl", "Control the cornice desktop-shell panel.")
        .child(volume::command()?)?
        .child(night_light::command()?)?
        .child(quick_settings::command()?)?
        .child(message_tray::command()?)
}

/// Rejects any trailing arguments for commands that take none.
fn reject_arguments(arguments: &[String], usage: &'static str) -> Result<(), AppError> {
    if arguments.is_empty() {
        Ok(())
    } else {
        Err(AppError::usage(usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_lists_every_command_group() {
        let tree = control_tree().expect("build tree");
        assert_eq!(tree.name(), "cornicectl");
        let mut out = Vec::new();
        let mut context = ControlContext::new(cornice_config::SocketEndpoint::new("/tmp/x.sock"));
        crate::cmd_tree::dispatch(&tree, &[], &mut context, &mut out).expect("render root");
        let rendered = String::from_utf8(out).expect("utf8");
        for group in ["volume", "night-light", "quick-settings", "message-tray"] {
            assert!(rendered.contains(group), "missing '{group}' in: {rendered}");
        }
    }
}
