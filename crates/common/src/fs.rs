//! Filesystem helpers.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{PhotoboothError, PhotoboothResult};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write `bytes` to `path` via a temporary sibling and a rename.
///
/// Readers see either the previous file or the complete new one, never a
/// partial write. Concurrent writers to the same path each use their own
/// temporary file; the last rename wins.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> PhotoboothResult<()> {
    let temp_path = temp_sibling(path);

    if let Err(e) = std::fs::write(&temp_path, bytes) {
        std::fs::remove_file(&temp_path).ok();
        return Err(PhotoboothError::storage(
            format!("failed to write {}", temp_path.display()),
            e,
        ));
    }

    std::fs::rename(&temp_path, path).map_err(|e| {
        std::fs::remove_file(&temp_path).ok();
        PhotoboothError::storage(format!("failed to move into {}", path.display()), e)
    })
}

/// Hidden `.tmp` sibling unique to this process and call.
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{name}.{}.{n}.tmp", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_replaces_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.bin");
        let err = write_atomic(&path, b"x").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Storage);
    }
}
