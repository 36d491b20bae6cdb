//! The built-in backends (terminal, JSON lines, rotating file) can't cover every use case.
//! The `Output` trait lets hosts add their own without modifying linelog itself.

mod file;
mod json;
pub mod line_sync;
mod terminal;

pub use file::FileOutput;
pub use json::JsonOutput;
pub use line_sync::{CLEAR_LINE, ClearMode, LineSyncWriter};
pub use terminal::{ConsoleWriter, TerminalOutput, stderr_writer};

use crate::level::Level;
use chrono::{DateTime, Local};
use serde_json::Value;

/// Carries all data a backend needs to render one log line.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    /// Taken once when the record is created so every output shows the same instant.
    pub time: DateTime<Local>,
    /// Short component name; empty when the caller has none.
    pub scope: String,
    pub message: String,
    /// Structured key/value pairs in the order the caller added them.
    pub fields: Vec<(String, Value)>,
}

impl LogRecord {
    #[must_use]
    pub fn new(level: Level, scope: &str, message: &str) -> Self {
        Self {
            level,
            time: Local::now(),
            scope: scope.to_string(),
            message: message.to_string(),
            fields: Vec::new(),
        }
    }

    /// Looks up the first field with this key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// `Send + Sync` bounds let one logger be shared across worker threads.
pub trait Output: Send + Sync {
    /// Each backend renders the record in its own format (console line, JSON object).
    ///
    /// # Errors
    /// I/O errors from the underlying sink (stderr, file, pipe).
    fn write(&self, record: &LogRecord) -> Result<(), crate::Error>;

    /// Buffered backends may lose tail data on abrupt exit without an explicit flush.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), crate::Error>;
}
