//! Progress bars and spinners redraw the current terminal line in place. A log line
//! written on top of that redraw would inherit the spinner's leftovers, so every
//! terminal write goes through [`LineSyncWriter`], which wipes the line once before
//! new content starts on it.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Carriage return followed by "erase entire line".
pub const CLEAR_LINE: &[u8] = b"\r\x1b[2K";

/// Whether the clear sequence is emitted at all.
///
/// Redirected output (files, pipes, CI logs) has no line to clear, and the raw
/// escape bytes would only pollute it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearMode {
    /// Clear only when the stream is an interactive terminal.
    #[default]
    Auto,
    /// Always emit the clear sequence.
    Always,
    /// Never emit it; line tracking still runs.
    Never,
}

impl ClearMode {
    /// Resolves the mode against what is known about the destination.
    #[must_use]
    pub const fn resolve(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        }
    }
}

impl std::str::FromStr for ClearMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" | "on" | "true" => Ok(Self::Always),
            "never" | "off" | "false" => Ok(Self::Never),
            _ => Err(format!("unknown clear mode: '{s}'")),
        }
    }
}

impl std::fmt::Display for ClearMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the guard protects: the sink itself and where its cursor sits.
struct LineState<W> {
    sink: W,
    at_line_start: bool,
}

/// Serializes writes to a terminal stream and clears the current line once
/// before each new logical line.
///
/// The writer must be the only path to `sink`. Bytes that bypass it leave
/// `at_line_start` describing a cursor position that no longer exists.
pub struct LineSyncWriter<W> {
    state: Mutex<LineState<W>>,
    clear_enabled: bool,
}

// Sinks are usually boxed trait objects with no Debug of their own
impl<W> std::fmt::Debug for LineSyncWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let at_line_start = self
            .state
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().at_line_start, |s| s.at_line_start);
        f.debug_struct("LineSyncWriter")
            .field("at_line_start", &at_line_start)
            .field("clear_enabled", &self.clear_enabled)
            .finish_non_exhaustive()
    }
}

impl<W: Write> LineSyncWriter<W> {
    /// Wraps `sink` with the clear sequence always enabled.
    #[must_use]
    pub const fn new(sink: W) -> Self {
        Self::with_clear(sink, true)
    }

    /// Wraps `sink`, emitting the clear sequence only when `clear_enabled` is set.
    #[must_use]
    pub const fn with_clear(sink: W, clear_enabled: bool) -> Self {
        Self {
            state: Mutex::new(LineState {
                sink,
                at_line_start: true,
            }),
            clear_enabled,
        }
    }

    /// Whether the next byte written would begin a new logical line.
    #[must_use]
    pub fn is_at_line_start(&self) -> bool {
        self.lock().at_line_start
    }

    #[must_use]
    pub const fn clears_enabled(&self) -> bool {
        self.clear_enabled
    }

    /// Gives the sink back, consuming the writer.
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .sink
    }

    /// Writes `buf` with a single sink call, clearing the line first if a new line starts here.
    ///
    /// Partial writes are returned as-is. If the clear sequence fails the payload is dropped.
    ///
    /// # Errors
    /// Whatever the sink reports, for either the clear sequence or the payload.
    pub fn write(&self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock();
        self.begin_line(&mut state)?;

        let n = state.sink.write(buf)?;
        if n > 0 && buf[n - 1] == b'\n' {
            state.at_line_start = true;
        }
        Ok(n)
    }

    /// Writes all of `buf` inside one critical section so no other caller can land
    /// between its chunks.
    ///
    /// # Errors
    /// Sink errors other than `Interrupted`, or `WriteZero` if the sink stops accepting bytes.
    pub fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        let mut state = self.lock();
        self.begin_line(&mut state)?;

        let mut rest = buf;
        while !rest.is_empty() {
            match state.sink.write(rest) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write whole buffer",
                    ));
                }
                Ok(n) => {
                    state.at_line_start = rest[n - 1] == b'\n';
                    rest = &rest[n..];
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// # Errors
    /// Whatever the sink reports.
    pub fn flush(&self) -> io::Result<()> {
        self.lock().sink.flush()
    }

    /// Emits the clear sequence if the cursor is at a line start, then marks the line as begun.
    fn begin_line(&self, state: &mut LineState<W>) -> io::Result<()> {
        if state.at_line_start {
            if self.clear_enabled {
                state.sink.write_all(CLEAR_LINE)?;
            }
            state.at_line_start = false;
        }
        Ok(())
    }

    // The guarded state is consistent between any two statements, so a panic
    // in another writer leaves nothing to repair.
    fn lock(&self) -> MutexGuard<'_, LineState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> Write for &LineSyncWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        LineSyncWriter::write(*self, buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        LineSyncWriter::write_all(*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        LineSyncWriter::flush(*self)
    }
}

impl<W: Write> Write for LineSyncWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Self::write(self, buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        Self::write_all(self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Self::flush(self)
    }
}
