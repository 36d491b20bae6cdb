//! Direct Logger construction would require knowing every output's internals;
//! the builder hides that behind a stepwise API.

use super::Logger;
use crate::fmt::{Color, ConsoleFormat};
use crate::internal;
use crate::level::Level;
use crate::output::{
    ClearMode, ConsoleWriter, FileOutput, JsonOutput, LineSyncWriter, Output, TerminalOutput,
    stderr_writer,
};
use crate::rotate::RotatingFile;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Direct Logger construction would expose output internals to every caller.
#[derive(Default)]
pub struct LoggerBuilder {
    pub(super) min_level: Level,
    pub(super) outputs: Vec<Box<dyn Output>>,
}

impl LoggerBuilder {
    /// Info is a safe default for production; Debug/Trace are opt-in.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Level::Info,
            outputs: Vec::new(),
        }
    }

    /// Noisy low-level messages slow down production output.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Terminal output has its own concerns (colors, clearing, shared writer) needing a sub-builder.
    #[must_use]
    pub fn terminal(self) -> TerminalBuilder {
        TerminalBuilder {
            parent: self,
            format: ConsoleFormat::new(),
            clear_mode: ClearMode::Auto,
            writer: None,
            sink: None,
        }
    }

    /// File output has its own concerns (rotation size, backups, age) needing a sub-builder.
    #[must_use]
    pub fn file(self, path: impl Into<PathBuf>) -> FileBuilder {
        FileBuilder {
            parent: self,
            file: RotatingFile::new(path),
        }
    }

    /// JSON lines into an arbitrary writer (a pipe, a socket, a test buffer).
    #[must_use]
    pub fn json(self, writer: impl Write + Send + 'static) -> Self {
        self.output(JsonOutput::new(writer))
    }

    /// The built-in backends can't cover every use case.
    #[must_use]
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.outputs.push(Box::new(output));
        self
    }

    /// Immutability after build guarantees thread-safe concurrent logging.
    #[must_use]
    pub fn build(self) -> Logger {
        Logger {
            min_level: self.min_level,
            outputs: self.outputs,
        }
    }
}

/// Terminal output settings, resolved into a [`TerminalOutput`] by `done`.
pub struct TerminalBuilder {
    parent: LoggerBuilder,
    format: ConsoleFormat,
    clear_mode: ClearMode,
    writer: Option<Arc<ConsoleWriter>>,
    sink: Option<Box<dyn Write + Send>>,
}

impl TerminalBuilder {
    /// Piped output and color-incapable terminals break on ANSI escape codes.
    #[must_use]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.format = self.format.colors(enabled);
        self
    }

    /// strftime pattern for the leading timestamp.
    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.format = self.format.time_format(format);
        self
    }

    /// Default level colors may clash with the user's terminal theme.
    #[must_use]
    pub fn level_color(mut self, level: Level, color: Color) -> Self {
        self.format = self.format.level_color(level, color);
        self
    }

    /// Applies only when this builder creates the writer (stderr or `sink`), not to a shared `writer`.
    #[must_use]
    pub const fn clear_mode(mut self, mode: ClearMode) -> Self {
        self.clear_mode = mode;
        self
    }

    /// Draws through an existing terminal writer instead of creating one. Anything
    /// else writing to the same terminal must use this writer too.
    #[must_use]
    pub fn writer(mut self, writer: Arc<ConsoleWriter>) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Writes to `sink` instead of stderr. `ClearMode::Auto` treats an arbitrary
    /// sink as non-interactive.
    #[must_use]
    pub fn sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Sub-builder consumes self, so there must be a way back to chain more outputs.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        let writer = match (self.writer, self.sink) {
            (Some(writer), _) => writer,
            (None, Some(sink)) => Arc::new(LineSyncWriter::with_clear(
                sink,
                self.clear_mode.resolve(false),
            )),
            (None, None) => Arc::new(stderr_writer(self.clear_mode)),
        };
        let output = TerminalOutput::with_writer(writer).format(self.format);
        self.parent.outputs.push(Box::new(output));
        self.parent
    }
}

/// Rotating file settings; the directory is created by `done`.
pub struct FileBuilder {
    parent: LoggerBuilder,
    file: RotatingFile,
}

impl FileBuilder {
    /// Rotate once the active file would exceed this many bytes.
    #[must_use]
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.file = self.file.max_size(bytes);
        self
    }

    /// Rotated files to keep; 0 keeps all.
    #[must_use]
    pub fn max_backups(mut self, count: usize) -> Self {
        self.file = self.file.max_backups(count);
        self
    }

    /// Delete rotated files older than this; 0 keeps them regardless of age.
    #[must_use]
    pub fn max_age_days(mut self, days: u32) -> Self {
        self.file = self.file.max_age_days(days);
        self
    }

    /// Gzip rotated files.
    #[must_use]
    pub fn compress(mut self, enabled: bool) -> Self {
        self.file = self.file.compress(enabled);
        self
    }

    /// A log directory that cannot be created skips the file output rather than
    /// failing the whole logger; the console keeps working.
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        if let Some(dir) = self.file.path().parent()
            && !dir.as_os_str().is_empty()
            && let Err(e) = fs::create_dir_all(dir)
        {
            internal::warn(
                "FILE",
                &format!("Skipping file output, cannot create {}: {e}", dir.display()),
            );
            return self.parent;
        }

        internal::debug(
            "FILE",
            &format!("File output at {}", self.file.path().display()),
        );
        self.parent
            .outputs
            .push(Box::new(FileOutput::from_file(self.file)));
        self.parent
    }
}
