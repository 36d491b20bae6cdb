//! Structured records: a message plus typed key/value fields, built up before sending.

use super::Logger;
use crate::level::Level;
use crate::output::LogRecord;
use serde_json::Value;

/// Collects fields for one record. Nothing is logged until [`Event::send`].
///
/// ```
/// use linelog::{Level, Logger};
///
/// let logger = Logger::builder().build();
/// logger
///     .event(Level::Info, "PKG")
///     .field("name", "firefox")
///     .field("bytes", 1024)
///     .send("download finished");
/// ```
#[must_use = "an event does nothing until `send` is called"]
pub struct Event<'a> {
    logger: &'a Logger,
    level: Level,
    scope: String,
    fields: Vec<(String, Value)>,
}

impl<'a> Event<'a> {
    pub(super) fn new(logger: &'a Logger, level: Level, scope: &str) -> Self {
        Self {
            logger,
            level,
            scope: scope.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Adds `error` with the error's message, and `error_chain` with each
    /// `source()` message when there are any.
    pub fn err(mut self, err: &(dyn std::error::Error + 'static)) -> Self {
        self.fields.push(("error".to_string(), Value::from(err.to_string())));

        let chain: Vec<Value> = std::iter::successors(err.source(), |e| e.source())
            .map(|e| Value::from(e.to_string()))
            .collect();
        if !chain.is_empty() {
            self.fields
                .push(("error_chain".to_string(), Value::Array(chain)));
        }
        self
    }

    /// Whether sending would reach any output; lets callers skip expensive fields.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.level >= self.logger.min_level()
    }

    pub fn send(self, msg: &str) {
        if !self.enabled() {
            return;
        }
        let mut record = LogRecord::new(self.level, &self.scope, msg);
        record.fields = self.fields;
        self.logger.dispatch(&record);
    }
}
