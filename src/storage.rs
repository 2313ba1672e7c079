//! Cache file storage helpers.
//!
//! Both the route cache and the config cache persist small JSON sidecar
//! files under `bootstrap/cache`. Writes go through a temp-file-then-rename
//! so a crash mid-write never leaves a half-written cache behind.

use std::fs;
use std::io;
use std::path::Path;

/// Write `bytes` to `path` atomically.
///
/// The payload lands in a `.tmp` sibling first and is renamed into place,
/// so readers only ever observe the old content or the new content.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Remove `path` if it exists. Returns whether a file was removed.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        write_atomic(&path, b"[1]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1]");

        write_atomic(&path, b"[1,2]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1,2]");

        // No temp file left behind
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn remove_reports_presence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        assert!(!remove_if_exists(&path).unwrap());
        fs::write(&path, "[]").unwrap();
        assert!(remove_if_exists(&path).unwrap());
        assert!(!path.exists());
    }
}
