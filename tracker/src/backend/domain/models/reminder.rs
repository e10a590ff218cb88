//! Reminder entity rules.
//!
//! A reminder's datetime must lie strictly after the moment it is submitted.
//! Reminders are listed soonest first.
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use shared::{CreateReminderRequest, Reminder, UpdateReminderRequest};
use std::str::FromStr;

use super::validation::{required, ValidationError};
use crate::backend::storage::Entity;

/// Formats accepted from a `datetime-local` style input, read in local time
const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a reminder instant and require it to be later than `now`
pub fn parse_reminder_datetime(value: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
    let value = required("datetime", value)?;

    let instant = DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            LOCAL_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(&value, format)
                    .ok()
                    .and_then(|naive| Local.from_local_datetime(&naive).earliest())
                    .map(|local| local.with_timezone(&Utc))
            })
        })
        .ok_or_else(|| ValidationError::invalid("datetime", "please enter a valid date and time"))?;

    if instant <= now {
        return Err(ValidationError::invalid("datetime", "please select a future date and time"));
    }
    Ok(instant)
}

/// Boolean reminder fields that can be flipped by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderFlag {
    Completed,
}

impl FromStr for ReminderFlag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(ReminderFlag::Completed),
            other => Err(ValidationError::invalid(
                "field",
                format!("'{}' is not a toggleable reminder field", other),
            )),
        }
    }
}

pub fn toggle_flag(reminder: &mut Reminder, flag: ReminderFlag) {
    match flag {
        ReminderFlag::Completed => reminder.completed = !reminder.completed,
    }
}

/// Whether a stored reminder still needs a notification armed
pub fn is_pending(reminder: &Reminder, now: DateTime<Utc>) -> bool {
    !reminder.completed && reminder.datetime > now
}

impl Entity for Reminder {
    type Draft = CreateReminderRequest;
    type Changes = UpdateReminderRequest;

    const STORAGE_KEY: &'static str = "pet_reminders";
    const KIND: &'static str = "reminder";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: CreateReminderRequest, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let title = required("title", &draft.title)?;
        let datetime = parse_reminder_datetime(&draft.datetime, now)?;

        Ok(Reminder {
            id,
            title,
            datetime,
            notes: draft.notes.trim().to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_changes(&mut self, changes: UpdateReminderRequest, now: DateTime<Utc>) -> Result<(), ValidationError> {
        let title = changes.title.as_deref().map(|t| required("title", t)).transpose()?;
        let datetime = changes
            .datetime
            .as_deref()
            .map(|dt| parse_reminder_datetime(dt, now))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(datetime) = datetime {
            self.datetime = datetime;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes.trim().to_string();
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }

        self.updated_at = now;
        Ok(())
    }

    fn display_order(items: &mut [Self]) {
        items.sort_by(|a, b| a.datetime.cmp(&b.datetime));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft(title: &str, datetime: &str) -> CreateReminderRequest {
        CreateReminderRequest {
            title: title.to_string(),
            datetime: datetime.to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_parse_rfc3339_and_local_input() {
        let now = Utc::now();
        let target = now + Duration::hours(2);

        let parsed = parse_reminder_datetime(&target.to_rfc3339(), now).unwrap();
        assert_eq!(parsed, target);

        let local_input = (Local::now() + Duration::days(1)).format("%Y-%m-%dT%H:%M").to_string();
        assert!(parse_reminder_datetime(&local_input, now).is_ok());
    }

    #[test]
    fn test_datetime_must_be_strictly_future() {
        let now = Utc::now();

        let err = parse_reminder_datetime(&now.to_rfc3339(), now).unwrap_err();
        assert_eq!(err.field(), "datetime");

        let err = parse_reminder_datetime("2020-01-01T09:00", now).unwrap_err();
        assert_eq!(err.field(), "datetime");

        let err = parse_reminder_datetime("next tuesday", now).unwrap_err();
        assert!(matches!(err, ValidationError::Invalid { field: "datetime", .. }));

        assert_eq!(
            parse_reminder_datetime("", now).unwrap_err(),
            ValidationError::Missing("datetime")
        );
    }

    #[test]
    fn test_title_checked_before_datetime() {
        let err = Reminder::from_draft(1, draft("  ", ""), Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::Missing("title"));
    }

    #[test]
    fn test_new_reminder_is_open() {
        let now = Utc::now();
        let when = (now + Duration::hours(1)).to_rfc3339();
        let reminder = Reminder::from_draft(1, draft("Vet visit", &when), now).unwrap();

        assert!(!reminder.completed);
        assert!(is_pending(&reminder, now));
        assert!(!is_pending(&reminder, now + Duration::hours(2)));
    }

    #[test]
    fn test_toggle_flag_parsing() {
        assert_eq!("completed".parse::<ReminderFlag>(), Ok(ReminderFlag::Completed));
        assert_eq!("done".parse::<ReminderFlag>().unwrap_err().field(), "field");
    }

    #[test]
    fn test_changes_can_reopen_and_reschedule() {
        let now = Utc::now();
        let when = (now + Duration::hours(1)).to_rfc3339();
        let mut reminder = Reminder::from_draft(1, draft("Vet visit", &when), now).unwrap();
        toggle_flag(&mut reminder, ReminderFlag::Completed);

        let later = now + Duration::days(3);
        reminder
            .apply_changes(
                UpdateReminderRequest {
                    datetime: Some(later.to_rfc3339()),
                    completed: Some(false),
                    ..Default::default()
                },
                now,
            )
            .unwrap();

        assert_eq!(reminder.datetime, later);
        assert!(!reminder.completed);
        assert_eq!(reminder.title, "Vet visit");
    }
}
