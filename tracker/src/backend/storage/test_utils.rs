//! Test utilities for consistent, self-cleaning storage fixtures.
//!
//! The temporary directory lives as long as the [`TestEnvironment`], so test
//! data is removed even if a test panics.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use super::key_value::KeyValueStore;
use super::medium::{FileStorage, MemoryStorage};

/// File-backed test environment rooted in a temporary directory
pub struct TestEnvironment {
    /// Kept alive to prevent cleanup until drop
    _temp_dir: TempDir,
    pub storage: FileStorage,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let storage = FileStorage::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            storage,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    pub fn store(&self) -> KeyValueStore {
        KeyValueStore::new(Arc::new(self.storage.clone()))
    }
}

/// Key-value store over a fresh in-memory medium, plus a handle to the
/// medium for quota tweaks and raw inspection
pub fn memory_store() -> (KeyValueStore, MemoryStorage) {
    let medium = MemoryStorage::new();
    (KeyValueStore::new(Arc::new(medium.clone())), medium)
}
