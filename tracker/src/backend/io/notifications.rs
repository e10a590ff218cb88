//! Transient user-facing messages for the outcome of each operation.
//!
//! Validation failures get a message that tells the user what to fix. Every
//! other failure gets a short generic message; the detail goes to the log.

use log::error;
use std::fmt;

use crate::backend::domain::{ProfileError, ValidationError};
use crate::backend::storage::{Entity, RepositoryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotification {
    pub message: String,
    pub kind: NotificationKind,
}

impl UserNotification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NotificationKind::Success }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: NotificationKind::Error }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

impl fmt::Display for UserNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Update,
    Delete,
}

impl Action {
    fn past_tense(self) -> &'static str {
        match self {
            Action::Add => "added",
            Action::Update => "updated",
            Action::Delete => "deleted",
        }
    }

    fn progressive(self) -> &'static str {
        match self {
            Action::Add => "adding",
            Action::Update => "updating",
            Action::Delete => "deleting",
        }
    }
}

/// Message for the outcome of `action` on an entity of kind `E`
pub fn report<E: Entity, T>(action: Action, result: &Result<T, RepositoryError>) -> UserNotification {
    match result {
        Ok(_) => UserNotification::success(format!("{} {} successfully", capitalize(E::KIND), action.past_tense())),
        Err(e) => repository_failure::<E>(action, e),
    }
}

/// Same as [`report`] for the photo-aware profile operations
pub fn report_profile<T>(action: Action, result: &Result<T, ProfileError>) -> UserNotification {
    match result {
        Ok(_) => UserNotification::success(format!("Pet profile {} successfully", action.past_tense())),
        Err(ProfileError::Repository(e)) => repository_failure::<shared::Profile>(action, e),
        Err(ProfileError::Photo(e)) => {
            error!("Photo could not be used: {}", e);
            UserNotification::error("Could not read the selected photo")
        }
    }
}

fn repository_failure<E: Entity>(action: Action, err: &RepositoryError) -> UserNotification {
    match err {
        RepositoryError::Validation(e) => UserNotification::error(validation_message(e)),
        RepositoryError::NotFound { .. } => {
            error!("Failed {} {}: {}", action.progressive(), E::KIND, err);
            UserNotification::error(format!("Error {} {}", action.progressive(), E::KIND))
        }
        RepositoryError::Persistence { .. } => {
            error!("Failed {} {}: {}", action.progressive(), E::KIND, err);
            UserNotification::error(format!("Failed to save {}", E::KIND))
        }
        RepositoryError::Unreadable { .. } => {
            error!("Failed {} {}: {}", action.progressive(), E::KIND, err);
            UserNotification::error(format!("Saved {} data could not be read, nothing was changed", E::KIND))
        }
    }
}

/// Actionable text for a validation failure
pub fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::Missing(field) => match *field {
            "name" => "Please enter your pet's name".to_string(),
            "title" => "Please enter a reminder title".to_string(),
            "datetime" => "Please select a date and time".to_string(),
            "date" => "Please select a date".to_string(),
            "type" => "Please select a record type".to_string(),
            other => format!("Please enter a {}", other),
        },
        ValidationError::Invalid { reason, .. } => capitalize(reason),
    }
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::PhotoError;
    use shared::{HealthRecord, Profile, Reminder};

    #[test]
    fn test_success_messages() {
        let ok: Result<(), RepositoryError> = Ok(());

        assert_eq!(report::<Reminder, _>(Action::Add, &ok), UserNotification::success("Reminder added successfully"));
        assert_eq!(
            report::<Profile, _>(Action::Update, &ok).message,
            "Pet profile updated successfully"
        );
        assert_eq!(
            report::<HealthRecord, _>(Action::Delete, &ok).message,
            "Health record deleted successfully"
        );
    }

    #[test]
    fn test_validation_messages_name_the_fix() {
        let missing_title: Result<(), _> = Err(RepositoryError::Validation(ValidationError::Missing("title")));
        let note = report::<Reminder, _>(Action::Add, &missing_title);
        assert!(note.is_error());
        assert_eq!(note.message, "Please enter a reminder title");

        let past: Result<(), _> = Err(RepositoryError::Validation(ValidationError::invalid(
            "datetime",
            "please select a future date and time",
        )));
        assert_eq!(report::<Reminder, _>(Action::Add, &past).message, "Please select a future date and time");

        assert_eq!(validation_message(&ValidationError::Missing("name")), "Please enter your pet's name");
        assert_eq!(validation_message(&ValidationError::Missing("type")), "Please select a record type");
    }

    #[test]
    fn test_other_failures_are_generic() {
        let missing: Result<(), _> = Err(RepositoryError::NotFound { kind: "health record", id: 7 });
        assert_eq!(
            report::<HealthRecord, _>(Action::Update, &missing),
            UserNotification::error("Error updating health record")
        );

        let full: Result<(), _> = Err(RepositoryError::Persistence { kind: "reminder", key: "pet_reminders" });
        assert_eq!(report::<Reminder, _>(Action::Add, &full).message, "Failed to save reminder");

        let unreadable: Result<(), _> =
            Err(RepositoryError::Unreadable { kind: "health record", key: "pet_health_records" });
        assert_eq!(
            report::<HealthRecord, _>(Action::Delete, &unreadable).message,
            "Saved health record data could not be read, nothing was changed"
        );
    }

    #[test]
    fn test_profile_photo_failure() {
        let result: Result<(), _> = Err(ProfileError::Photo(PhotoError::UnsupportedFormat("notes.txt".into())));
        let note = report_profile(Action::Add, &result);
        assert!(note.is_error());
        assert_eq!(note.to_string(), "Could not read the selected photo");

        let ok: Result<(), ProfileError> = Ok(());
        assert_eq!(report_profile(Action::Add, &ok).message, "Pet profile added successfully");
    }
}
