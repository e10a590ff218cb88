//! Human-readable formatting for dates, record types and care advice.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use shared::HealthRecordType;
use std::fmt::Display;

use super::notifications::capitalize;
use crate::backend::domain::advice::{Advice, DISCLAIMER};

/// Reminder instant in local time, e.g. "Mon, Jan 1, 2024, 10:00 AM"
pub fn format_reminder_datetime(datetime: &DateTime<Utc>) -> String {
    format_reminder_datetime_in(datetime, &Local)
}

pub fn format_reminder_datetime_in<Tz>(datetime: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    datetime
        .with_timezone(tz)
        .format("%a, %b %-d, %Y, %I:%M %p")
        .to_string()
}

/// Health record date, e.g. "January 10, 2024"
pub fn format_record_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Title-cased record type, e.g. "Checkup"
pub fn record_type_label(record_type: HealthRecordType) -> String {
    capitalize(record_type.as_str())
}

/// Plain-text rendering of one advice entry, followed by the disclaimer
pub fn render_advice(advice: &Advice) -> String {
    let mut out = String::new();
    out.push_str(advice.title);
    out.push('\n');

    for (heading, items) in [
        ("Common Symptoms", advice.symptoms),
        ("Immediate Actions", advice.immediate_actions),
        ("When to Seek Veterinary Care", advice.veterinary_care),
    ] {
        out.push('\n');
        out.push_str(heading);
        out.push('\n');
        for item in items {
            out.push_str("  - ");
            out.push_str(item);
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(DISCLAIMER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::advice::lookup;

    #[test]
    fn test_format_reminder_datetime() {
        let datetime = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(format_reminder_datetime_in(&datetime, &Utc), "Mon, Jan 1, 2024, 10:00 AM");

        let evening = Utc.with_ymd_and_hms(2024, 3, 15, 21, 5, 0).unwrap();
        assert_eq!(format_reminder_datetime_in(&evening, &Utc), "Fri, Mar 15, 2024, 09:05 PM");
    }

    #[test]
    fn test_format_record_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(format_record_date(&date), "January 10, 2024");
    }

    #[test]
    fn test_record_type_labels() {
        assert_eq!(record_type_label(HealthRecordType::Checkup), "Checkup");
        assert_eq!(record_type_label(HealthRecordType::Vaccination), "Vaccination");
        assert_eq!(record_type_label(HealthRecordType::Other), "Other");
    }

    #[test]
    fn test_render_advice() {
        let text = render_advice(lookup("lethargy").unwrap());

        assert!(text.starts_with("Lethargy\n"));
        assert!(text.contains("Immediate Actions\n  - Monitor food and water intake\n"));
        assert!(text.ends_with(DISCLAIMER));
    }
}
