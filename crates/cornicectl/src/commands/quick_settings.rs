//! Quick-settings tray visibility commands.

use cornice_ipc::{QuickSettingsClose, QuickSettingsOpen, QuickSettingsToggle};

use crate::cmd_tree::CommandTreeError;
use crate::context::ControlContext;
use crate::errors::AppError;

use super::{ControlNode, reject_arguments};

pub(super) fn command() -> Result<ControlNode, CommandTreeError> {
    ControlNode::group(
        "quick-settings",
        "Control the visibility of the quick-settings tray.",
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
    reject_arguments(arguments, "Usage: cornicectl quick-settings open")?;
    context.send(&QuickSettingsOpen)
}

fn close(context: &mut ControlContext, arguments: &[String]) -> Result<(), AppError> {
    reject_arguments(arguments, "Usage: cornicectl quick-settings close")?;
    context.send(&QuickSettingsClose)
}

fn toggle(context: &mut ControlContext, arguments: &[String]) -> Result<(), AppError> {
    reject_arguments(arguments, "Usage: cornicectl quick-settings toggle")?;
    context.send(&QuickSettingsToggle)
}
