//! Rotated backups are rarely read again but still worth keeping; gzip reclaims
//! most of their space.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

/// `app-<ts>.log` becomes `app-<ts>.log.gz`.
pub(super) fn gz_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

/// Compresses `path` next to itself and removes the original. Returns bytes saved.
///
/// A half-written `.gz` is removed on failure so the next pass can retry from the original.
pub(super) fn compress_file(path: &Path) -> io::Result<u64> {
    let input = File::open(path)?;
    let original_size = input.metadata()?.len();

    let gz = gz_path(path);
    let compressed_size = match write_gz(BufReader::new(input), &gz) {
        Ok(size) => size,
        Err(e) => {
            let _ = fs::remove_file(&gz);
            return Err(e);
        }
    };

    // The .gz now holds all content, so remove the original to actually free space
    fs::remove_file(path)?;

    Ok(original_size.saturating_sub(compressed_size))
}

fn write_gz(mut reader: impl Read, gz: &Path) -> io::Result<u64> {
    let output = File::create(gz)?;
    let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder
        .finish()?
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;
    Ok(fs::metadata(gz)?.len())
}
