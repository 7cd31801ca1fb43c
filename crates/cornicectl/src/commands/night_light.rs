//! Night-light gamma filter commands.

use cornice_ipc::{NightLightOff, NightLightOn};

use crate::cmd_tree::CommandTreeError;
use crate::context::ControlContext;
use crate::errors::AppError;

use super::{ControlNode, reject_arguments};

const TEMPERATURE_REJECTION: &str = "Colour temperature must be an integer between 1000 and 10000";

pub(super) fn command() -> Result<ControlNode, CommandTreeError> {
    ControlNode::group(
        "night-light",
        "Control the night-light gamma filter for the desktop session.",
    )
    .child(ControlNode::leaf(
        "on",
        "Enable the filter at a colour temperature (default 3000)",
        on,
    ))?
    .child(ControlNode::leaf("off", "Disable the filter", off))
}

fn on(context: &mut ControlContext, arguments: &[String]) -> Result<(), AppError> {
    let temperature = match arguments {
        [] => NightLightOn::DEFAULT_TEMPERATURE,
        [value] => parse_temperature(value)?,
        _ => {
            return Err(AppError::usage(
                "Usage: cornicectl night-light on [temperature]",
            ));
        }
    };
    context.send(&NightLightOn { temperature })
}

fn off(context: &mut ControlContext, arguments: &[String]) -> Result<(), AppError> {
    reject_arguments(arguments, "Usage: cornicectl night-light off")?;
    context.send(&NightLightOff)
}

fn parse_temperature(value: &str) -> Result<u16, AppError> {
    let temperature: u16 = value
        .parse()
        .map_err(|_| AppError::usage(TEMPERATURE_REJECTION))?;
    if !NightLightOn::TEMPERATURE_RANGE.contains(&temperature) {
        return Err(AppError::usage(TEMPERATURE_REJECTION));
    }
    Ok(temperature)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::too_cold("500")]
    #[case::too_hot("20000")]
    #[case::negative("-3000")]
    #[case::not_a_number("warm")]
    fn rejects_out_of_range_temperatures(#[case] value: &str) {
        let error = parse_temperature(value).expect_err("temperature must be rejected");
        match error {
            AppError::Usage { message } => assert_eq!(message, TEMPERATURE_REJECTION),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case::lower_bound("1000", 1000)]
    #[case::default_value("3000", 3000)]
    #[case::upper_bound("10000", 10000)]
    fn accepts_in_range_temperatures(#[case] value: &str, #[case] expected: u16) {
        assert_eq!(parse_temperature(value).expect("valid temperature"), expected);
    }

    #[cfg(unix)]
    #[test]
    fn bare_on_sends_the_default_temperature() {
        use std::io::Read;
        use std::os::unix::net::UnixListener;

        use cornice_ipc::WireMessage;

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("cornice.sock");
        let listener = UnixListener::bind(&path).expect("bind listener");
        let mut context = ControlContext::new(cornice_config::SocketEndpoint::new(
            path.to_str().expect("utf8 path").to_owned(),
        ));

        on(&mut context, &[]).expect("send night-light-on");
        drop(context);

        let (mut stream, _) = listener.accept().expect("accept");
        let mut received = Vec::new();
        stream.read_to_end(&mut received).expect("read frame");
        assert_eq!(
            received,
            NightLightOn {
                temperature: NightLightOn::DEFAULT_TEMPERATURE,
            }
            .encode()
        );
    }
}
