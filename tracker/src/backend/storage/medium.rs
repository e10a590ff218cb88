//! # Storage Media
//!
//! Concrete [`StorageMedium`] implementations.
//!
//! ## File Structure
//!
//! `FileStorage` keeps one JSON document per key:
//!
//! ```text
//! data/
//! ├── config.yaml
//! ├── pet_profiles.json
//! ├── pet_health_records.json
//! └── pet_reminders.json
//! ```
//!
//! Writes go to a temp file first and are renamed into place, so a crash
//! never leaves a half-written list behind.

use anyhow::Result;
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::traits::{StorageError, StorageMedium};

const ITEM_EXTENSION: &str = "json";

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

fn check_quota(key: &str, used_by_others: u64, value: &str, quota: Option<u64>) -> Result<(), StorageError> {
    if let Some(limit) = quota {
        let needed = used_by_others + value.len() as u64;
        if needed > limit {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                needed,
                limit,
            });
        }
    }
    Ok(())
}

/// File-backed storage: one `<key>.json` file per key in a base directory
#[derive(Clone, Debug)]
pub struct FileStorage {
    base_directory: PathBuf,
    quota_bytes: Option<u64>,
}

impl FileStorage {
    /// Create a file storage rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            quota_bytes: None,
        })
    }

    /// Limit the total bytes stored across all keys
    pub fn with_quota(mut self, quota_bytes: Option<u64>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn item_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base_directory.join(format!("{}.{}", key, ITEM_EXTENSION)))
    }

    /// Bytes used by every stored item except `key`
    fn used_bytes_excluding(&self, key: &str) -> Result<u64, StorageError> {
        let own_file = format!("{}.{}", key, ITEM_EXTENSION);
        let mut total = 0;

        for entry in fs::read_dir(&self.base_directory)? {
            let entry = entry?;
            let path = entry.path();
            let is_item = path.extension().and_then(|e| e.to_str()) == Some(ITEM_EXTENSION);
            if !is_item || entry.file_name().to_string_lossy() == own_file {
                continue;
            }
            total += entry.metadata()?.len();
        }

        Ok(total)
    }
}

impl StorageMedium for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.item_path(key)?;

        if !path.exists() {
            debug!("No stored item for key '{}'", key);
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;

        if self.quota_bytes.is_some() {
            let used = self.used_bytes_excluding(key)?;
            check_quota(key, used, value, self.quota_bytes)?;
        }

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct MemoryState {
    items: HashMap<String, String>,
    quota_bytes: Option<u64>,
}

/// In-process storage; clones share the same underlying map
#[derive(Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: u64) -> Self {
        let storage = Self::new();
        storage.set_quota(Some(quota_bytes));
        storage
    }

    /// Change the quota; existing items are kept even if they exceed it
    pub fn set_quota(&self, quota_bytes: Option<u64>) {
        self.lock().quota_bytes = quota_bytes;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageMedium for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.lock().items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut state = self.lock();

        let used: u64 = state
            .items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len() as u64)
            .sum();
        check_quota(key, used, value, state.quota_bytes)?;

        state.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.lock().items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::test_utils::TestEnvironment;

    #[test]
    fn test_file_storage_missing_key_returns_none() {
        let env = TestEnvironment::new().unwrap();
        assert!(env.storage.get_item("pet_profiles").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_write_and_read() {
        let env = TestEnvironment::new().unwrap();

        env.storage.set_item("pet_reminders", "[1,2,3]").unwrap();
        env.storage.set_item("pet_reminders", "[4]").unwrap();

        assert_eq!(env.storage.get_item("pet_reminders").unwrap().as_deref(), Some("[4]"));
        assert!(env.base_directory().join("pet_reminders.json").exists());
        assert!(!env.base_directory().join("pet_reminders.tmp").exists());
    }

    #[test]
    fn test_file_storage_remove() {
        let env = TestEnvironment::new().unwrap();

        env.storage.set_item("pet_profiles", "[]").unwrap();
        env.storage.remove_item("pet_profiles").unwrap();
        env.storage.remove_item("pet_profiles").unwrap();

        assert!(env.storage.get_item("pet_profiles").unwrap().is_none());
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() {
        let env = TestEnvironment::new().unwrap();

        assert!(matches!(
            env.storage.set_item("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(env.storage.get_item(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_file_storage_quota_counts_other_keys() {
        let env = TestEnvironment::new().unwrap();
        let storage = env.storage.clone().with_quota(Some(10));

        storage.set_item("a", "123456").unwrap();
        // Overwriting the same key only counts the new value
        storage.set_item("a", "1234567890").unwrap();

        let result = storage.set_item("b", "x");
        assert!(matches!(result, Err(StorageError::QuotaExceeded { limit: 10, .. })));
        assert!(storage.get_item("b").unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_shared_between_clones() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set_item("pet_profiles", "[]").unwrap();
        assert_eq!(other.get_item("pet_profiles").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_storage_quota() {
        let storage = MemoryStorage::with_quota(4);

        storage.set_item("k", "1234").unwrap();
        assert!(matches!(
            storage.set_item("k", "12345"),
            Err(StorageError::QuotaExceeded { needed: 5, limit: 4, .. })
        ));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("1234"));

        storage.set_quota(None);
        storage.set_item("k", "12345").unwrap();
    }
}
