//! Naming and discovery of rotated backups: `<stem>-<UTC timestamp><ext>[.gz]`
//! in the same directory as the active file.

use chrono::{NaiveDateTime, TimeDelta, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Millisecond precision keeps two rotations in the same second apart.
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

/// One rotated-out log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub path: PathBuf,
    /// UTC time the file was rotated out, parsed back from its name.
    pub time: NaiveDateTime,
    pub compressed: bool,
}

/// `app.log` splits into `("app", ".log")`; a name without extension gets `""`.
fn split_name(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    let ext = path
        .extension()
        .map_or_else(String::new, |e| format!(".{}", e.to_string_lossy()));
    (stem, ext)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn name_at(path: &Path, time: NaiveDateTime) -> PathBuf {
    let (stem, ext) = split_name(path);
    let stamp = time.format(BACKUP_TIME_FORMAT);
    parent_dir(path).join(format!("{stem}-{stamp}{ext}"))
}

/// Picks a backup name for `path` that is not taken yet, in plain or compressed form.
/// Names always sort after every existing backup, even when the clock has not
/// moved since the last rotation.
pub(super) fn backup_name(path: &Path) -> PathBuf {
    let mut time = Utc::now().naive_utc();
    if let Ok(existing) = list_backups(path)
        && let Some(newest) = existing.first()
        && newest.time >= time
    {
        time = newest.time + TimeDelta::milliseconds(1);
    }
    loop {
        let candidate = name_at(path, time);
        if !candidate.exists() && !super::compress::gz_path(&candidate).exists() {
            return candidate;
        }
        time += TimeDelta::milliseconds(1);
    }
}

/// Every backup belonging to `path`, newest first. Files that merely share the
/// prefix but carry no parseable timestamp are ignored.
///
/// # Errors
/// The directory cannot be read.
pub fn list_backups(path: &Path) -> io::Result<Vec<Backup>> {
    let dir = parent_dir(path);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let (stem, ext) = split_name(path);
    let prefix = format!("{stem}-");
    let gz_ext = format!("{ext}.gz");

    let mut backups = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(rest) = name.strip_prefix(&prefix) else {
            continue;
        };

        let (stamp, compressed) = if let Some(stamp) = rest.strip_suffix(&gz_ext) {
            (stamp, true)
        } else if let Some(stamp) = rest.strip_suffix(&ext) {
            (stamp, false)
        } else {
            continue;
        };

        if let Ok(time) = NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT) {
            backups.push(Backup {
                path: entry.path(),
                time,
                compressed,
            });
        }
    }

    backups.sort_by(|a, b| b.time.cmp(&a.time));
    Ok(backups)
}
