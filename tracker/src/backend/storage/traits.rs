//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage media to be used interchangeably, and the contract each persisted
//! entity kind fulfils so one generic repository can manage all of them.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::domain::models::validation::ValidationError;

/// Errors raised by a storage medium.
///
/// These never escape the key-value store; it logs them and degrades to a
/// `false` / `None` result.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { key: String, needed: u64, limit: u64 },
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),
}

/// A persistent string-keyed storage medium
///
/// Mirrors the browser's local storage: whole string values are read and
/// written under a key. Implementations must be safe to share across threads.
pub trait StorageMedium: Send + Sync {
    /// Read the value stored under `key`, `None` if it was never written
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key is not an error
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// A record kind persisted as one list under a fixed storage key.
///
/// `Draft` is the raw user input accepted by `create`, `Changes` the partial
/// edit accepted by `update`.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft;
    type Changes;

    /// Key the whole list is stored under
    const STORAGE_KEY: &'static str;

    /// Human-readable kind, used in logs and error messages
    const KIND: &'static str;

    fn id(&self) -> i64;

    /// Validate a draft and build the entity with the given id.
    /// Both `createdAt` and `updatedAt` are stamped with `now`.
    fn from_draft(id: i64, draft: Self::Draft, now: DateTime<Utc>) -> Result<Self, ValidationError>;

    /// Validate and merge the fields present in `changes`, then stamp `updatedAt`.
    fn apply_changes(&mut self, changes: Self::Changes, now: DateTime<Utc>) -> Result<(), ValidationError>;

    /// Order a loaded list for display. Defaults to insertion order.
    fn display_order(_items: &mut [Self]) {}
}
