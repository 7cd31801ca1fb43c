//! Binary entrypoint for the cornice control daemon.

use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    match corniced::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}
