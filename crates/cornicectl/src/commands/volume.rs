//! Volume control commands for the default audio sink.

use cornice_ipc::{VolumeDown, VolumeSet, VolumeUp};

use crate::cmd_tree::CommandTreeError;
use crate::context::ControlContext;
use crate::errors::AppError;

use super::{ControlNode, reject_arguments};

const LEVEL_REJECTION: &str = "Volume must be a float between 0.0 and 1.0";

pub(super) fn command() -> Result<ControlNode, CommandTreeError> {
    ControlNode::group(
        "volume",
        "Control the volume of the default audio sink for the desktop session.",
    )
    .child(ControlNode::leaf("up", "Raise the volume by one step", up))?
    .child(ControlNode::leaf(
        "down",
        "Lower the volume by one step",
        down,
    ))?
    .child(ControlNode::leaf(
        "set",
        "Set the volume to an absolute level (0.0-1.0)",
        set,
    ))
}

fn up(context: &mut ControlContext, arguments: &[String]) -> Result<(), AppError> {
    reject_arguments(arguments, "Usage: cornicectl volume up")?;
    context.send(&VolumeUp)
}

fn down(context: &mut ControlContext, arguments: &[String]) -> Result<(), AppError> {
    reject_arguments(arguments, "Usage: cornicectl volume down")?;
    context.send(&VolumeDown)
}

fn set(context: &mut ControlContext, arguments: &[String]) -> Result<(), AppError> {
    let [level] = arguments else {
        return Err(AppError::usage("Usage: cornicectl volume set <level>"));
    };
    let level: f32 = level.parse().map_err(|_| AppError::usage(LEVEL_REJECTION))?;
    if !VolumeSet::RANGE.contains(&level) {
        return Err(AppError::usage(LEVEL_REJECTION));
    }
    context.send(&VolumeSet { level })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn unreachable_context() -> ControlContext {
        ControlContext::new(cornice_config::SocketEndpoint::new(
            "/nonexistent/cornice/cornice.sock",
        ))
    }

    fn arguments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| String::from(*part)).collect()
    }

    #[rstest]
    #[case::negative("-0.1")]
    #[case::above_one("1.5")]
    #[case::well_above("2.0")]
    #[case::not_a_number("loud")]
    #[case::nan("NaN")]
    fn set_rejects_invalid_levels_before_sending(#[case] level: &str) {
        // The context points at a nonexistent socket: a connect attempt would
        // surface as AppError::Connect, so a Usage error proves validation
        // ran first and nothing was sent.
        let mut context = unreachable_context();
        let error = set(&mut context, &arguments(&[level])).expect_err("level must be rejected");
        match error {
            AppError::Usage { message } => assert_eq!(message, LEVEL_REJECTION),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case::missing(&[])]
    #[case::surplus(&["0.5", "0.6"])]
    fn set_requires_exactly_one_argument(#[case] parts: &[&str]) {
        let mut context = unreachable_context();
        let error = set(&mut context, &arguments(parts)).expect_err("arity must be rejected");
        match error {
            AppError::Usage { message } => {
                assert_eq!(message, "Usage: cornicectl volume set <level>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn up_and_down_reject_trailing_arguments() {
        let mut context = unreachable_context();
        let error = up(&mut context, &arguments(&["extra"])).expect_err("up takes no arguments");
        assert!(matches!(error, AppError::Usage { .. }));
        let error =
            down(&mut context, &arguments(&["extra"])).expect_err("down takes no arguments");
        assert!(matches!(error, AppError::Usage { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn valid_level_is_delivered_on_the_wire() {
        use std::io::Read;
        use std::os::unix::net::UnixListener;

        use cornice_ipc::WireMessage;

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("cornice.sock");
        let listener = UnixListener::bind(&path).expect("bind listener");
        let mut context = ControlContext::new(cornice_config::SocketEndpoint::new(
            path.to_str().expect("utf8 path").to_owned(),
        ));

        set(&mut context, &arguments(&["0.5"])).expect("send volume-set");
        drop(context);

        let (mut stream, _) = listener.accept().expect("accept");
        let mut received = Vec::new();
        stream.read_to_end(&mut received).expect("read frame");
        assert_eq!(received, VolumeSet { level: 0.5 }.encode());
    }
}
