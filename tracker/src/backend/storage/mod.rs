//! # Storage Module
//!
//! Handles all data persistence for the pet care tracker.
//!
//! ## Layers
//!
//! - **Storage medium** ([`StorageMedium`]): a string-keyed store of whole
//!   text values. `FileStorage` keeps one JSON file per key; `MemoryStorage`
//!   is an in-process map used by tests.
//! - **Key-value store** ([`KeyValueStore`]): JSON (de)serialization on top of
//!   a medium. Never raises: failures degrade to `false` / `None`.
//! - **Repository** ([`Repository`]): CRUD over one entity kind's list under
//!   its fixed key, with id assignment, validation and display ordering.
//!
//! ## Persisted Layout
//!
//! | Key | Contents |
//! |---|---|
//! | `pet_profiles` | `[Profile]` |
//! | `pet_health_records` | `[HealthRecord]` |
//! | `pet_reminders` | `[Reminder]` |

pub mod key_value;
pub mod medium;
pub mod repository;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use key_value::{KeyValueStore, LoadError};
pub use medium::{FileStorage, MemoryStorage};
pub use repository::{Repository, RepositoryError};
pub use traits::{Entity, StorageError, StorageMedium};
