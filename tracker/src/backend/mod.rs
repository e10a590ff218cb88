//! # Backend Module
//!
//! Contains all non-UI logic for the pet care tracker.
//!
//! ## Architecture
//!
//! ```text
//! Presentation (out of tree)
//!     ↓
//! IO Layer (user notifications, display formatting, notification host)
//!     ↓
//! Domain Layer (entity rules, services, reminder scheduler, advice)
//!     ↓
//! Storage Layer (storage medium, key-value store, repositories)
//! ```
//!
//! [`initialize_backend`] wires the layers into an [`AppState`] that the
//! presentation layer holds on to.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use log::info;
use shared::{HealthRecord, Profile, Reminder};
use std::sync::Arc;

use crate::backend::config::AppConfig;
use crate::backend::domain::{NotificationHost, ProfileService, ReminderScheduler, ReminderService};
use crate::backend::storage::{FileStorage, KeyValueStore, Repository};

/// Application state holding every service
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub profiles: ProfileService,
    pub health_records: Repository<HealthRecord>,
    pub reminders: ReminderService,
}

/// Initialize the backend on file storage in the configured data directory
pub fn initialize_backend(config: AppConfig, host: Arc<dyn NotificationHost>) -> Result<AppState> {
    info!("Setting up storage in {}", config.data_directory.display());
    let storage = FileStorage::new(&config.data_directory)
        .with_context(|| format!("Failed to open data directory {}", config.data_directory.display()))?
        .with_quota(config.storage_quota_bytes);

    Ok(initialize_with_store(config, KeyValueStore::new(Arc::new(storage)), host))
}

/// Wire the services over an already-open store
pub fn initialize_with_store(config: AppConfig, store: KeyValueStore, host: Arc<dyn NotificationHost>) -> AppState {
    info!("Setting up repositories");
    let profile_repository: Repository<Profile> = Repository::new(store.clone());
    let health_records: Repository<HealthRecord> = Repository::new(store.clone());
    let reminder_repository: Repository<Reminder> = Repository::new(store);

    info!("Setting up domain services");
    let scheduler = ReminderScheduler::new(host, reminder_repository.clone(), config.notification_settings());
    let reminders = ReminderService::new(reminder_repository, scheduler);
    let profiles = ProfileService::new(profile_repository);

    info!("Setting up application state");
    AppState {
        config,
        profiles,
        health_records,
        reminders,
    }
}
