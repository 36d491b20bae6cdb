//! Console output shares the terminal with progress renderers, so every line it
//! produces goes through a [`LineSyncWriter`].

use super::{ClearMode, LineSyncWriter, LogRecord, Output};
use crate::fmt::{Color, ConsoleFormat};
use crate::level::Level;
use std::io::{self, Write};
use std::sync::Arc;

/// The writer type terminal outputs share. Boxed so stderr, pipes and test
/// buffers all fit behind one `Arc`.
pub type ConsoleWriter = LineSyncWriter<Box<dyn Write + Send>>;

/// Renders records as console lines and hands each one to the shared terminal writer.
#[derive(Debug, Clone)]
pub struct TerminalOutput {
    format: ConsoleFormat,
    writer: Arc<ConsoleWriter>,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalOutput {
    /// Writes to standard error, clearing lines only when it is a terminal.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(Arc::new(stderr_writer(ClearMode::Auto)))
    }

    /// Several outputs can share one terminal writer, which keeps their lines whole.
    ///
    /// Progress bars and spinners should draw on the raw stream, not through this
    /// writer. The writer only clears at the start of a line it begins itself, so a
    /// partial progress line written through it is continued by the next record.
    #[must_use]
    pub fn with_writer(writer: Arc<ConsoleWriter>) -> Self {
        Self {
            format: ConsoleFormat::new(),
            writer,
        }
    }

    /// Replaces every rendering setting at once.
    #[must_use]
    pub fn format(mut self, format: ConsoleFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.format = self.format.colors(enabled);
        self
    }

    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.format = self.format.time_format(format);
        self
    }

    #[must_use]
    pub fn level_color(mut self, level: Level, color: Color) -> Self {
        self.format = self.format.level_color(level, color);
        self
    }

    #[must_use]
    pub fn writer(mut self, writer: Arc<ConsoleWriter>) -> Self {
        self.writer = writer;
        self
    }

    /// The writer this output draws through, for sharing with other outputs.
    #[must_use]
    pub fn shared_writer(&self) -> Arc<ConsoleWriter> {
        Arc::clone(&self.writer)
    }
}

/// Standard error behind a [`ConsoleWriter`], with `mode` resolved against the real stream.
#[must_use]
pub fn stderr_writer(mode: ClearMode) -> ConsoleWriter {
    let stderr = io::stderr();
    let clear = mode.resolve(io::IsTerminal::is_terminal(&stderr));
    LineSyncWriter::with_clear(Box::new(stderr), clear)
}

impl Output for TerminalOutput {
    fn write(&self, record: &LogRecord) -> Result<(), crate::Error> {
        let line = self.format.render(record);
        // One critical section per record, so a line is never split by another thread
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.writer.flush()?;
        Ok(())
    }
}
