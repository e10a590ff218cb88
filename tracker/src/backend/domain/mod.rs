//! # Domain Module
//!
//! Contains the business rules of the pet care tracker.
//!
//! ## Module Organization
//!
//! - **models**: entity rules (validation, id-preserving edits, display order)
//!   for profiles, health records and reminders
//! - **scheduler**: one-shot reminder notifications behind a
//!   [`NotificationHost`]
//! - **reminder_service**: reminder CRUD that keeps timers in step
//! - **profile_service**: profile CRUD plus asynchronous photo decoding
//! - **photo**: image file to data URL encoding
//! - **advice**: the fixed symptom advice table
//!
//! ## Business Rules
//!
//! - Profiles need a name; health records need a date and a known type;
//!   reminders need a title and a datetime strictly in the future
//! - Edits keep `id` and `createdAt` and refresh `updatedAt`
//! - Health records are listed most recent first, reminders soonest first
//! - Completed, deleted or re-timed reminders never notify

pub mod advice;
pub mod models;
pub mod photo;
pub mod profile_service;
pub mod reminder_service;
pub mod scheduler;

pub use models::ValidationError;
pub use photo::PhotoError;
pub use profile_service::{ProfileError, ProfileService};
pub use reminder_service::ReminderService;
pub use scheduler::{
    NotificationHost, NotificationPermission, NotificationSettings, ReminderNotification, ReminderScheduler,
    ScheduleOutcome,
};
