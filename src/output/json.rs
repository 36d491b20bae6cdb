//! Machine-readable output: one JSON object per line, so `grep` and `jq` work on
//! log files without a parser of their own.

use super::{LogRecord, Output};

use chrono::SecondsFormat;
use serde_json::{Map, Value};
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Keys the entry itself owns; caller fields with these names are dropped.
const RESERVED_KEYS: &[&str] = &["level", "time", "scope", "message"];

/// JSON lines into any writer. The mutex keeps each line whole when several
/// threads log at once.
#[derive(Debug)]
pub struct JsonOutput<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonOutput<W> {
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Gives the writer back, consuming the output.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the writer while holding the lock.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut writer)
    }
}

/// Flat object: level and time first, caller fields in insertion order, message last.
#[must_use]
pub fn render_entry(record: &LogRecord) -> Map<String, Value> {
    let mut entry = Map::new();
    entry.insert("level".into(), Value::from(record.level.as_str()));
    entry.insert(
        "time".into(),
        Value::from(record.time.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    if !record.scope.is_empty() {
        entry.insert("scope".into(), Value::from(record.scope.as_str()));
    }
    for (key, value) in &record.fields {
        if !RESERVED_KEYS.contains(&key.as_str()) {
            entry.insert(key.clone(), value.clone());
        }
    }
    entry.insert("message".into(), Value::from(record.message.as_str()));
    entry
}

impl<W: Write + Send> Output for JsonOutput<W> {
    fn write(&self, record: &LogRecord) -> Result<(), crate::Error> {
        let mut line = serde_json::to_vec(&render_entry(record))?;
        line.push(b'\n');

        // Single write_all so a rotating sink sees the whole line at once
        self.with_writer(|w| w.write_all(&line))?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.with_writer(|w| w.flush())?;
        Ok(())
    }
}
