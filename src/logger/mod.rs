//! Direct construction would require knowing every output's internals. The builder
//! hides that behind a stepwise API, and the resulting Logger fans out each record
//! to all configured outputs.

mod builder;
mod event;
mod from_config;

pub use builder::{FileBuilder, LoggerBuilder, TerminalBuilder};
pub use event::Event;

use crate::internal;
use crate::level::Level;
use crate::output::{JsonOutput, LogRecord, Output};
use std::io::Write;

/// Immutable after build, so one logger can be shared by every worker thread.
#[derive(Default)]
pub struct Logger {
    min_level: Level,
    outputs: Vec<Box<dyn Output>>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .field("outputs", &self.outputs.len())
            .finish()
    }
}

impl Logger {
    /// Direct construction would expose output internals; the builder provides a guided API instead.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// JSON lines at every level into `writer`; for tests that assert on log output.
    #[must_use]
    pub fn test_logger(writer: impl Write + Send + 'static) -> Self {
        Self::builder()
            .level(Level::Trace)
            .output(JsonOutput::new(writer))
            .build()
    }

    /// Core dispatch: filters by severity, then fans out to all configured outputs.
    pub fn log(&self, level: Level, scope: &str, msg: &str) {
        if level < self.min_level {
            return;
        }
        self.dispatch(&LogRecord::new(level, scope, msg));
    }

    /// Starts a structured record; see [`Event`].
    pub fn event(&self, level: Level, scope: &str) -> Event<'_> {
        Event::new(self, level, scope)
    }

    /// Each output is independent: one failing sink (a closed pipe, a full disk)
    /// must not silence the others, so errors are dropped here.
    pub(crate) fn dispatch(&self, record: &LogRecord) {
        let was_inside = internal::enter_output();
        for output in &self.outputs {
            let _ = output.write(record);
        }
        internal::leave_output(was_inside);
    }

    /// High-volume instrumentation that should vanish in production builds.
    pub fn trace(&self, scope: &str, msg: &str) {
        self.log(Level::Trace, scope, msg);
    }

    /// Development-time diagnostics that are too noisy for normal operation.
    pub fn debug(&self, scope: &str, msg: &str) {
        self.log(Level::Debug, scope, msg);
    }

    /// Normal operational milestones.
    pub fn info(&self, scope: &str, msg: &str) {
        self.log(Level::Info, scope, msg);
    }

    /// Non-fatal anomalies: retries, skipped steps, recoverable errors.
    pub fn warn(&self, scope: &str, msg: &str) {
        self.log(Level::Warn, scope, msg);
    }

    /// Failures that abort the current operation.
    pub fn error(&self, scope: &str, msg: &str) {
        self.log(Level::Error, scope, msg);
    }

    /// Records at fatal severity. Exiting is the caller's decision, not the logger's.
    pub fn fatal(&self, scope: &str, msg: &str) {
        self.log(Level::Fatal, scope, msg);
    }

    /// Records at panic severity. Unwinding is the caller's decision, not the logger's.
    pub fn panic(&self, scope: &str, msg: &str) {
        self.log(Level::Panic, scope, msg);
    }

    /// Buffered outputs may lose tail data on abrupt exit without an explicit flush.
    ///
    /// # Errors
    /// Returns the first I/O error encountered across all outputs.
    pub fn flush(&self) -> Result<(), crate::Error> {
        for output in &self.outputs {
            output.flush()?;
        }
        Ok(())
    }

    /// Tests and diagnostics need to verify which severity threshold is active.
    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    /// Tests verify the builder wired up the expected number of backends.
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }
}
