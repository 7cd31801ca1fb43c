//! Binary entrypoint for the cornice control client.
//!
//! The binary delegates to [`cornicectl::run`], which parses arguments,
//! loads configuration, and dispatches the command tokens against the
//! running panel daemon.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    cornicectl::run(std::env::args_os(), &mut stdout, &mut stderr)
}
