//! Message tray visibility commands.

use cornice_ipc::{MessageTrayClose, MessageTrayOpen, MessageTrayToggle};

use crate::cmd_tree::CommandTreeError;
use crate::context::ControlContext;
use crate::errors::AppError;

use super::{ControlNode, reject_arguments};

pub(super) fn command() -> Result<ControlNode, CommandTreeError> {
    ControlNode::group(
        "message-tray",
        "Control the visibility of the message tray.",
    )
    .child(ControlNode::leaf("open", "Reveal the tray", open))?
    .child(ControlNode::leaf("close", "Hide the tray", close))?
    .child(ControlNode::leaf(
        "toggle",
        "Toggle the tray's visibility",
        toggle,
    ))
}

fn open(context: &mut ControlContext, arguments: &[String]) -> Result<(), AppError> {
    reject_arguments(arguments, "Usage: cornicectl message-tray open")?;
    context.send(&MessageTrayOpen)
}

fn close(context: &mut ControlContext, arguments: &[String]) -> Result<(), AppError> {
    reject_arguments(arguments, "Usage: cornicectl message-tray close")?;
    context.send(&MessageTrayClose)
}

fn toggle(context: &mut ControlContext, arguments: &[String]) -> Result<(), AppError> {
    reject_arguments(arguments, "Usage: cornicectl message-tray toggle")?;
    context.send(&MessageTrayToggle)
}
