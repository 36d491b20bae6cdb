//! The most common CLI operation: every shell script needs a way to emit a
//! single log line that lands on a clean terminal line.

use crate::level::Level;
use crate::logger::Logger;
use std::process::ExitCode;

#[must_use]
pub fn cmd_log(logger: &Logger, level: Level, scope: &str, message: &[String]) -> ExitCode {
    logger.log(level, scope, &message.join(" "));
    match logger.flush() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("linelog: {e}");
            ExitCode::FAILURE
        }
    }
}
