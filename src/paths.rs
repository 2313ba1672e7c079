//! Project directory layout.
//!
//! # Responsibilities
//! - Resolve every well-known directory relative to one project root
//! - Locate the bootstrap cache files (route table, config snapshot)
//! - Create the bootstrap cache directory on demand
//!
//! # Design Decisions
//! - Explicit context object, constructed once and passed around;
//!   no process-global base path
//! - Pure path arithmetic; nothing here touches the filesystem except
//!   `ensure_bootstrap_cache`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolves filesystem locations for an application rooted at `base`.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    base: PathBuf,
}

impl ProjectPaths {
    /// Create a resolver rooted at the given directory.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Root the resolver at the process working directory.
    pub fn from_current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// The project root.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Configuration sources directory.
    pub fn config_dir(&self) -> PathBuf {
        self.base.join("config")
    }

    /// Writable storage root.
    pub fn storage(&self) -> PathBuf {
        self.base.join("storage")
    }

    /// Execution log directory.
    pub fn logs(&self) -> PathBuf {
        self.storage().join("log")
    }

    /// Session file directory.
    pub fn session(&self) -> PathBuf {
        self.storage().join("session")
    }

    /// Uploaded / generated file directory.
    pub fn files(&self) -> PathBuf {
        self.storage().join("files")
    }

    /// Directory holding the bootstrap cache files.
    pub fn bootstrap_cache(&self) -> PathBuf {
        self.base.join("bootstrap").join("cache")
    }

    /// The persisted route table.
    pub fn route_cache_file(&self) -> PathBuf {
        self.bootstrap_cache().join("route.json")
    }

    /// The persisted configuration snapshot.
    pub fn config_cache_file(&self) -> PathBuf {
        self.bootstrap_cache().join("config.json")
    }

    /// Create the bootstrap cache directory if it does not exist yet.
    pub fn ensure_bootstrap_cache(&self) -> io::Result<()> {
        let dir = self.bootstrap_cache();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            tracing::debug!(dir = %dir.display(), "bootstrap cache directory created");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_files_live_under_bootstrap_cache() {
        let paths = ProjectPaths::new("/srv/app");
        assert_eq!(
            paths.route_cache_file(),
            PathBuf::from("/srv/app/bootstrap/cache/route.json")
        );
        assert_eq!(
            paths.config_cache_file(),
            PathBuf::from("/srv/app/bootstrap/cache/config.json")
        );
    }

    #[test]
    fn storage_subdirectories() {
        let paths = ProjectPaths::new("/srv/app");
        assert_eq!(paths.logs(), PathBuf::from("/srv/app/storage/log"));
        assert_eq!(paths.session(), PathBuf::from("/srv/app/storage/session"));
        assert_eq!(paths.files(), PathBuf::from("/srv/app/storage/files"));
    }

    #[test]
    fn ensure_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ProjectPaths::new(dir.path());
        assert!(!paths.bootstrap_cache().exists());
        paths.ensure_bootstrap_cache().unwrap();
        assert!(paths.bootstrap_cache().is_dir());
        // Idempotent
        paths.ensure_bootstrap_cache().unwrap();
    }
}
