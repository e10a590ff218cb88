//! # Entity Repository
//!
//! Generic CRUD over one entity kind's list, persisted through the
//! [`KeyValueStore`] under the kind's fixed key.
//!
//! Every operation loads the list fresh; nothing is cached between calls.
//! Read-modify-write sequences hold a mutex shared by all clones of the
//! repository so two writers can never interleave.

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use shared::Reminder;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use super::key_value::KeyValueStore;
use super::traits::Entity;
use crate::backend::domain::models::reminder::{toggle_flag, ReminderFlag};
use crate::backend::domain::models::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: i64 },
    #[error("Failed to save {kind} list under '{key}'")]
    Persistence { kind: &'static str, key: &'static str },
    /// The stored list exists but could not be read; writing would destroy it
    #[error("Stored {kind} list under '{key}' could not be read, refusing to overwrite it")]
    Unreadable { kind: &'static str, key: &'static str },
}

/// Next id for a list: the current epoch millis, bumped past the largest
/// existing id so ids stay unique and increasing within a single tick.
/// `None` once the id space is exhausted.
pub fn next_id<E: Entity>(existing: &[E], now: DateTime<Utc>) -> Option<i64> {
    let candidate = now.timestamp_millis();
    match existing.iter().map(Entity::id).max() {
        Some(max_id) if max_id >= candidate => max_id.checked_add(1),
        _ => Some(candidate),
    }
}

pub struct Repository<E: Entity> {
    store: KeyValueStore,
    write_lock: Arc<Mutex<()>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            write_lock: Arc::clone(&self.write_lock),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(store: KeyValueStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
            _entity: PhantomData,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load_all(&self) -> Vec<E> {
        self.store.load_list(E::STORAGE_KEY)
    }

    /// Load for a read-modify-write. Unlike `load_all`, a stored list that
    /// cannot be read is an error rather than an empty list.
    fn load_for_write(&self) -> Result<Vec<E>, RepositoryError> {
        self.store
            .load_existing::<Vec<E>>(E::STORAGE_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|e| {
                error!("Not writing {} list: {}", E::KIND, e);
                RepositoryError::Unreadable {
                    kind: E::KIND,
                    key: E::STORAGE_KEY,
                }
            })
    }

    fn persistence_error() -> RepositoryError {
        RepositoryError::Persistence {
            kind: E::KIND,
            key: E::STORAGE_KEY,
        }
    }

    fn persist(&self, items: &[E]) -> Result<(), RepositoryError> {
        if self.store.save(E::STORAGE_KEY, items) {
            Ok(())
        } else {
            Err(Self::persistence_error())
        }
    }

    /// All entities in display order. An absent key yields an empty list.
    pub fn list(&self) -> Vec<E> {
        let mut items = self.load_all();
        E::display_order(&mut items);
        debug!("Loaded {} {} entries", items.len(), E::KIND);
        items
    }

    pub fn get(&self, id: i64) -> Option<E> {
        self.load_all().into_iter().find(|item| item.id() == id)
    }

    /// Validate a draft, assign a fresh id and append it to the stored list
    pub fn create(&self, draft: E::Draft) -> Result<E, RepositoryError> {
        let _guard = self.lock();
        let now = Utc::now();

        let mut items = self.load_for_write()?;
        let id = next_id(&items, now).ok_or_else(|| {
            error!("No {} id left after the largest stored id", E::KIND);
            Self::persistence_error()
        })?;
        let entity = E::from_draft(id, draft, now)?;

        items.push(entity.clone());
        self.persist(&items)?;

        info!("Created {} with ID: {}", E::KIND, entity.id());
        Ok(entity)
    }

    /// Merge `changes` into the entity with `id`, keeping its position
    pub fn update(&self, id: i64, changes: E::Changes) -> Result<E, RepositoryError> {
        let updated = self.modify(id, |entity, now| entity.apply_changes(changes, now))?;
        info!("Updated {} with ID: {}", E::KIND, id);
        Ok(updated)
    }

    /// Remove the entity with `id` and return the remaining list in display
    /// order. Deleting an absent id writes nothing and is not an error.
    pub fn delete(&self, id: i64) -> Result<Vec<E>, RepositoryError> {
        let _guard = self.lock();

        let mut items = self.load_for_write()?;
        let before = items.len();
        items.retain(|item| item.id() != id);

        if items.len() == before {
            warn!("Delete of {} {}: not found, nothing to do", E::KIND, id);
        } else {
            self.persist(&items)?;
            info!("Deleted {} with ID: {}", E::KIND, id);
        }

        E::display_order(&mut items);
        Ok(items)
    }

    /// Apply `mutate` to a copy of the entity and persist it in place.
    /// The stored list only changes if both the mutation and the save succeed.
    fn modify<F>(&self, id: i64, mutate: F) -> Result<E, RepositoryError>
    where
        F: FnOnce(&mut E, DateTime<Utc>) -> Result<(), ValidationError>,
    {
        let _guard = self.lock();
        let now = Utc::now();

        let mut items = self.load_for_write()?;
        let index = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(RepositoryError::NotFound { kind: E::KIND, id })?;

        let mut entity = items[index].clone();
        mutate(&mut entity, now)?;
        items[index] = entity.clone();

        self.persist(&items)?;
        Ok(entity)
    }
}

impl Repository<Reminder> {
    /// Flip a boolean reminder field by name; only `completed` exists
    pub fn toggle(&self, id: i64, field: &str) -> Result<Reminder, RepositoryError> {
        let flag: ReminderFlag = field.parse()?;
        let reminder = self.modify(id, |reminder, now| {
            toggle_flag(reminder, flag);
            reminder.updated_at = now;
            Ok(())
        })?;

        info!("Toggled {} on reminder {} to {}", field, id, reminder.completed);
        Ok(reminder)
    }
}
