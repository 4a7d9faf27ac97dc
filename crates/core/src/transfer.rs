//! Local file helpers for uploads and downloads
//!
//! Downloads must be atomic from the caller's perspective: bytes are
//! staged in a temporary file in the destination directory and renamed
//! into place only on success, so a failed transfer never leaves a
//! partially written destination.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Check that an upload source exists and is a regular file
pub fn ensure_readable_file(path: &Path) -> Result<u64> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(meta.len()),
        Ok(_) => Err(Error::LocalFileNotFound(format!(
            "{} is not a regular file",
            path.display()
        ))),
        Err(_) => Err(Error::LocalFileNotFound(path.display().to_string())),
    }
}

/// Write bytes to `dest` atomically
///
/// The temp file lives in the destination's directory so the final
/// rename never crosses a filesystem boundary.
pub fn write_atomic(dest: &Path, data: &[u8]) -> Result<()> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(dest).map_err(|e| Error::Io(e.error))?;
    tracing::debug!(dest = %dest.display(), bytes = data.len(), "wrote file atomically");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.bin");
        std::fs::write(&file, b"hello").unwrap();

        assert_eq!(ensure_readable_file(&file).unwrap(), 5);

        // Missing file
        let missing = dir.path().join("nope.bin");
        assert!(matches!(
            ensure_readable_file(&missing),
            Err(Error::LocalFileNotFound(_))
        ));

        // Directory is not a regular file
        assert!(matches!(
            ensure_readable_file(dir.path()),
            Err(Error::LocalFileNotFound(_))
        ));
    }

    #[test]
    fn test_write_atomic_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.txt");

        write_atomic(&dest, b"world").unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"world");
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.txt");
        std::fs::write(&dest, b"old contents").unwrap();

        write_atomic(&dest, b"new").unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.txt");

        write_atomic(&dest, b"data").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
