//! A log file that never rotates eventually fills the disk. [`RotatingFile`] caps the
//! active file's size, keeps a bounded set of timestamped backups, expires old ones,
//! and gzips the rest.

mod backups;
mod compress;
mod size;

pub use backups::{Backup, list_backups};
pub use size::{format_size, parse_size};

use crate::internal;
use chrono::{TimeDelta, Utc};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 10 MiB.
pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_MAX_BACKUPS: usize = 3;
pub const DEFAULT_MAX_AGE_DAYS: u32 = 28;

/// Size-rotated append-only file. Opened lazily on first write.
///
/// Pruning and compression run inside the write that triggers the rotation, so
/// that write blocks until every backup is gzipped (up to `max_backups` files of
/// `max_size` bytes each), and so does every other thread waiting on the output
/// that owns this file. Turn `compress` off where that stall is not acceptable.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_size: u64,
    /// 0 keeps every backup.
    max_backups: usize,
    /// 0 disables age-based expiry.
    max_age_days: u32,
    compress: bool,
    file: Option<File>,
    size: u64,
}

impl RotatingFile {
    /// Defaults: 10 MiB per file, 3 backups, 28 days, compressed.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_size: DEFAULT_MAX_SIZE,
            max_backups: DEFAULT_MAX_BACKUPS,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            compress: true,
            file: None,
            size: 0,
        }
    }

    /// A zero size falls back to the default; a file that can hold nothing is never useful.
    #[must_use]
    pub const fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = if bytes == 0 { DEFAULT_MAX_SIZE } else { bytes };
        self
    }

    #[must_use]
    pub const fn max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use]
    pub const fn max_age_days(mut self, days: u32) -> Self {
        self.max_age_days = days;
        self
    }

    #[must_use]
    pub const fn compress(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes in the active file, as far as this handle knows.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Backups of this file, newest first.
    ///
    /// # Errors
    /// The log directory cannot be read.
    pub fn backups(&self) -> io::Result<Vec<Backup>> {
        list_backups(&self.path)
    }

    /// Moves the active file aside and starts a fresh one, then prunes backups.
    ///
    /// # Errors
    /// The active file cannot be renamed or the new one cannot be created.
    pub fn rotate(&mut self) -> io::Result<()> {
        self.file = None;
        self.open_new()?;
        self.prune();
        Ok(())
    }

    /// Appends to the existing file, or creates it.
    fn open_existing_or_new(&mut self) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.size = file.metadata()?.len();
        internal::trace(
            "ROTATE",
            &format!(
                "Opened {} ({})",
                self.path.display(),
                format_size(self.size)
            ),
        );
        self.file = Some(file);
        Ok(())
    }

    /// Renames any current file to its backup name and creates an empty one in its place.
    fn open_new(&mut self) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if self.path.exists() {
            let backup = backups::backup_name(&self.path);
            fs::rename(&self.path, &backup)?;
            internal::debug(
                "ROTATE",
                &format!("Rotated {} -> {}", self.path.display(), backup.display()),
            );
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.file = Some(file);
        self.size = 0;
        Ok(())
    }

    /// Applies the backup-count, age, and compression policies on the calling thread.
    /// Failures are reported as diagnostics only; a pruning problem must never
    /// fail a write.
    fn prune(&self) {
        let backups = match self.backups() {
            Ok(b) => b,
            Err(e) => {
                internal::warn("ROTATE", &format!("Cannot list backups: {e}"));
                return;
            }
        };

        let cutoff = (self.max_age_days > 0)
            .then(|| Utc::now().naive_utc() - TimeDelta::days(i64::from(self.max_age_days)));

        for (index, backup) in backups.iter().enumerate() {
            let over_count = self.max_backups > 0 && index >= self.max_backups;
            let too_old = cutoff.is_some_and(|c| backup.time < c);

            if over_count || too_old {
                match fs::remove_file(&backup.path) {
                    Ok(()) => internal::debug(
                        "ROTATE",
                        &format!("Removed backup {}", backup.path.display()),
                    ),
                    Err(e) => internal::warn(
                        "ROTATE",
                        &format!("Cannot remove {}: {e}", backup.path.display()),
                    ),
                }
            } else if self.compress && !backup.compressed {
                match compress::compress_file(&backup.path) {
                    Ok(saved) => internal::debug(
                        "ROTATE",
                        &format!(
                            "Compressed {} (saved {})",
                            backup.path.display(),
                            format_size(saved)
                        ),
                    ),
                    Err(e) => internal::warn(
                        "ROTATE",
                        &format!("Cannot compress {}: {e}", backup.path.display()),
                    ),
                }
            }
        }
    }
}

impl Write for RotatingFile {
    /// Writes the whole buffer or nothing, rotating first if it would not fit.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if len > self.max_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "write length {len} exceeds maximum file size {}",
                    self.max_size
                ),
            ));
        }

        if self.file.is_none() {
            self.open_existing_or_new()?;
        }
        if self.size + len > self.max_size {
            self.rotate()?;
        }

        let Some(file) = self.file.as_mut() else {
            return Err(io::Error::other("log file is not open"));
        };
        file.write_all(buf)?;
        self.size += len;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.as_mut().map_or(Ok(()), |f| f.flush())
    }
}
