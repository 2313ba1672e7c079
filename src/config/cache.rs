//! The on-disk configuration snapshot.
//!
//! # Responsibilities
//! - Materialize the merged section snapshot to `bootstrap/cache/config.json`
//! - Serve reads from an in-memory copy after the first load
//! - Remove the snapshot on bootstrap and on explicit cache clears
//!
//! # Design Decisions
//! - The wire shape is a JSON array holding a single object keyed by
//!   section name; `section` lookups descend that object
//! - `mount` only writes when the file is absent, so a process never
//!   clobbers a snapshot another component already produced
//! - Missing keys in `section` lookups yield `None`, never an error

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde_json::Value;
use thiserror::Error;

use crate::config::schema::ConfigSections;
use crate::paths::ProjectPaths;
use crate::storage;

/// Error raised while reading or writing the config snapshot.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config cache io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config cache parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Owns the persisted configuration snapshot for one process.
pub struct ConfigCache {
    path: PathBuf,
    sections: ConfigSections,
    memo: OnceLock<Value>,
}

impl ConfigCache {
    /// Create a cache bound to the project's config cache file.
    pub fn new(paths: &ProjectPaths, sections: ConfigSections) -> Self {
        Self {
            path: paths.config_cache_file(),
            sections,
            memo: OnceLock::new(),
        }
    }

    /// The backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the merged snapshot to disk if no snapshot exists yet.
    pub fn mount(&self) -> Result<(), ConfigError> {
        if self.path.exists() {
            return Ok(());
        }

        let document = Value::Array(vec![serde_json::to_value(&self.sections)?]);
        storage::write_atomic(&self.path, &serde_json::to_vec(&document)?)?;

        tracing::debug!(path = %self.path.display(), "config cache mounted");
        Ok(())
    }

    /// Remove the snapshot file. Returns whether one existed.
    pub fn destroy(&self) -> Result<bool, ConfigError> {
        let removed = storage::remove_if_exists(&self.path)?;
        if removed {
            tracing::debug!(path = %self.path.display(), "config cache destroyed");
        }
        Ok(removed)
    }

    /// Load the snapshot, mounting it first when absent.
    ///
    /// The parsed document is memoized; repeat calls within the process
    /// return the same copy even if the file changes underneath.
    pub fn read(&self) -> Result<&Value, ConfigError> {
        if let Some(document) = self.memo.get() {
            return Ok(document);
        }

        self.mount()?;
        let raw = std::fs::read_to_string(&self.path)?;
        let document: Value = serde_json::from_str(&raw)?;

        Ok(self.memo.get_or_init(|| document))
    }

    /// Look up a value inside a named section.
    ///
    /// `dotted_path` descends nested mappings (`"default.host"`). A `None`
    /// path returns the whole section. Any missing segment yields
    /// `Ok(None)`.
    pub fn section(&self, name: &str, dotted_path: Option<&str>) -> Result<Option<Value>, ConfigError> {
        let document = self.read()?;
        let mut current = document.get(0).and_then(|doc| doc.get(name));

        if let Some(path) = dotted_path {
            for segment in path.split('.') {
                current = current.and_then(|value| value.get(segment));
            }
        }

        Ok(current.cloned())
    }

    /// Lookup inside the `app` section.
    pub fn app(&self, path: &str) -> Result<Option<Value>, ConfigError> {
        self.section("app", Some(path))
    }

    /// Lookup inside the `cors` section.
    pub fn cors(&self, path: &str) -> Result<Option<Value>, ConfigError> {
        self.section("cors", Some(path))
    }

    /// Lookup inside the `database` section.
    pub fn database(&self, path: &str) -> Result<Option<Value>, ConfigError> {
        self.section("database", Some(path))
    }

    /// Lookup inside the `mail` section.
    pub fn mail(&self, path: &str) -> Result<Option<Value>, ConfigError> {
        self.section("mail", Some(path))
    }

    /// Lookup inside the `endpoints` section.
    pub fn endpoints(&self, path: &str) -> Result<Option<Value>, ConfigError> {
        self.section("endpoints", Some(path))
    }
}
