//! File output: JSON lines into a size-rotated file.

use super::json::JsonOutput;
use super::{LogRecord, Output};
use crate::rotate::RotatingFile;
use std::path::{Path, PathBuf};

/// JSON lines appended to a [`RotatingFile`]. Nothing touches the disk until the first record.
#[derive(Debug)]
pub struct FileOutput {
    path: PathBuf,
    inner: JsonOutput<RotatingFile>,
}

impl FileOutput {
    /// Rotation defaults: 10 MiB, 3 backups, 28 days, compressed.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_file(RotatingFile::new(path))
    }

    /// Takes a fully configured rotating file.
    #[must_use]
    pub fn from_file(file: RotatingFile) -> Self {
        Self {
            path: file.path().to_path_buf(),
            inner: JsonOutput::new(file),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forces a rotation of the underlying file.
    ///
    /// # Errors
    /// The active file cannot be moved aside or recreated.
    pub fn rotate(&self) -> Result<(), crate::Error> {
        self.inner.with_writer(RotatingFile::rotate)?;
        Ok(())
    }
}

impl Output for FileOutput {
    fn write(&self, record: &LogRecord) -> Result<(), crate::Error> {
        self.inner.write(record)
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.inner.flush()
    }
}
