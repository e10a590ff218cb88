//! Health record entity rules.
//!
//! Records are listed most recent first; ties keep their stored order.
use chrono::{DateTime, NaiveDate, Utc};
use shared::{CreateHealthRecordRequest, HealthRecord, HealthRecordType, UpdateHealthRecordRequest};

use super::validation::{required, ValidationError};
use crate::backend::storage::Entity;

pub fn parse_record_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = required("date", value)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|_| ValidationError::invalid("date", format!("'{}' is not a YYYY-MM-DD date", value)))
}

pub fn parse_record_type(value: &str) -> Result<HealthRecordType, ValidationError> {
    let value = required("type", value)?;
    value
        .parse()
        .map_err(|e: shared::UnknownHealthRecordType| ValidationError::invalid("type", e.to_string()))
}

impl Entity for HealthRecord {
    type Draft = CreateHealthRecordRequest;
    type Changes = UpdateHealthRecordRequest;

    const STORAGE_KEY: &'static str = "pet_health_records";
    const KIND: &'static str = "health record";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: CreateHealthRecordRequest, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let date = parse_record_date(&draft.date)?;
        let record_type = parse_record_type(&draft.record_type)?;

        Ok(HealthRecord {
            id,
            date,
            record_type,
            notes: draft.notes.trim().to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_changes(&mut self, changes: UpdateHealthRecordRequest, now: DateTime<Utc>) -> Result<(), ValidationError> {
        let date = changes.date.as_deref().map(parse_record_date).transpose()?;
        let record_type = changes.record_type.as_deref().map(parse_record_type).transpose()?;

        if let Some(date) = date {
            self.date = date;
        }
        if let Some(record_type) = record_type {
            self.record_type = record_type;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes.trim().to_string();
        }

        self.updated_at = now;
        Ok(())
    }

    fn display_order(items: &mut [Self]) {
        items.sort_by(|a, b| b.date.cmp(&a.date));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(date: &str, record_type: &str) -> CreateHealthRecordRequest {
        CreateHealthRecordRequest {
            date: date.to_string(),
            record_type: record_type.to_string(),
            notes: " booster ".to_string(),
        }
    }

    #[test]
    fn test_from_draft() {
        let record = HealthRecord::from_draft(5, draft("2024-03-01", "vaccination"), Utc::now()).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(record.record_type, HealthRecordType::Vaccination);
        assert_eq!(record.notes, "booster");
    }

    #[test]
    fn test_required_fields_checked_in_order() {
        let err = HealthRecord::from_draft(1, draft("", ""), Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::Missing("date"));

        let err = HealthRecord::from_draft(1, draft("2024-03-01", ""), Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::Missing("type"));
    }

    #[test]
    fn test_domain_checks() {
        let err = HealthRecord::from_draft(1, draft("2024-02-30", "checkup"), Utc::now()).unwrap_err();
        assert_eq!(err.field(), "date");

        let err = HealthRecord::from_draft(1, draft("03/01/2024", "checkup"), Utc::now()).unwrap_err();
        assert_eq!(err.field(), "date");

        let err = HealthRecord::from_draft(1, draft("2024-03-01", "grooming"), Utc::now()).unwrap_err();
        assert!(matches!(err, ValidationError::Invalid { field: "type", .. }));
    }

    #[test]
    fn test_display_order_is_descending_and_stable() {
        let now = Utc::now();
        let mut records = vec![
            HealthRecord::from_draft(1, draft("2024-01-10", "checkup"), now).unwrap(),
            HealthRecord::from_draft(2, draft("2024-03-01", "vaccination"), now).unwrap(),
            HealthRecord::from_draft(3, draft("2024-01-10", "medication"), now).unwrap(),
        ];

        HealthRecord::display_order(&mut records);

        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
