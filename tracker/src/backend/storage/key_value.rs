//! # Key-Value Store
//!
//! The single persistence boundary. Values are serialized to JSON text on
//! save and parsed back on load. Storage failures are logged and reported
//! as `false` / `None`; nothing here returns an error to the caller.

use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use super::traits::{StorageError, StorageMedium};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Stored data under '{key}' could not be parsed: {source}")]
    Unreadable {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone)]
pub struct KeyValueStore {
    medium: Arc<dyn StorageMedium>,
}

impl KeyValueStore {
    pub fn new(medium: Arc<dyn StorageMedium>) -> Self {
        Self { medium }
    }

    /// Serialize `value` under `key`. Returns `false` if serialization or the
    /// write failed; the previously stored value is then left untouched.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                error!("Error serializing value for key '{}': {}", key, e);
                return false;
            }
        };

        match self.medium.set_item(key, &text) {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving to storage under '{}': {}", key, e);
                false
            }
        }
    }

    /// Load and deserialize the value under `key`.
    ///
    /// Returns `None` when the key is absent, the stored text is empty, or it
    /// does not parse as a `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.load_existing(key) {
            Ok(value) => value,
            Err(e @ LoadError::Storage(_)) => {
                error!("Error loading '{}' from storage: {}", key, e);
                None
            }
            Err(e @ LoadError::Unreadable { .. }) => {
                warn!("{}", e);
                None
            }
        }
    }

    /// Like [`load`](Self::load), but distinguishes a value that exists and
    /// cannot be read from one that was never written. Writers use this so a
    /// list they could not read is never replaced.
    pub fn load_existing<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LoadError> {
        let text = match self.medium.get_item(key)? {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(None),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| LoadError::Unreadable { key: key.to_string(), source })
    }

    /// Load a list, treating an absent or unreadable key as empty
    pub fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.load(key).unwrap_or_default()
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.medium.remove_item(key) {
            Ok(()) => true,
            Err(e) => {
                error!("Error removing '{}' from storage: {}", key, e);
                false
            }
        }
    }
}
