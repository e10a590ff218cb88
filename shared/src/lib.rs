use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pet profile as persisted under `pet_profiles`.
///
/// Ids are epoch milliseconds at creation time, bumped when needed so they
/// stay unique within the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub age: String,
    pub weight: String,
    /// Embedded image as a `data:<mime>;base64,...` URL
    pub photo: Option<String>,
    pub medical_history: String,
    pub vaccinations: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form input for a new profile. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub name: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub vaccinations: String,
    #[serde(default)]
    pub notes: String,
}

/// Partial profile edit; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub weight: Option<String>,
    pub photo: Option<String>,
    pub medical_history: Option<String>,
    pub vaccinations: Option<String>,
    pub notes: Option<String>,
}

/// Kind of health record entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthRecordType {
    Vaccination,
    Checkup,
    Medication,
    Surgery,
    Other,
}

impl HealthRecordType {
    pub const ALL: [HealthRecordType; 5] = [
        HealthRecordType::Vaccination,
        HealthRecordType::Checkup,
        HealthRecordType::Medication,
        HealthRecordType::Surgery,
        HealthRecordType::Other,
    ];

    /// Stored form of the type, as it appears in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthRecordType::Vaccination => "vaccination",
            HealthRecordType::Checkup => "checkup",
            HealthRecordType::Medication => "medication",
            HealthRecordType::Surgery => "surgery",
            HealthRecordType::Other => "other",
        }
    }
}

impl fmt::Display for HealthRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known health record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHealthRecordType(pub String);

impl fmt::Display for UnknownHealthRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not one of vaccination, checkup, medication, surgery, other",
            self.0
        )
    }
}

impl std::error::Error for UnknownHealthRecordType {}

impl FromStr for HealthRecordType {
    type Err = UnknownHealthRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HealthRecordType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| UnknownHealthRecordType(s.to_string()))
    }
}

/// Health record as persisted under `pet_health_records`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub id: i64,
    /// Calendar date of the event (YYYY-MM-DD)
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub record_type: HealthRecordType,
    pub notes: String,
    /// Lists written before timestamps were tracked load with the epoch
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// Form input for a new health record; date and type arrive as raw strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHealthRecordRequest {
    pub date: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHealthRecordRequest {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub notes: Option<String>,
}

/// Reminder as persisted under `pet_reminders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    pub datetime: DateTime<Utc>,
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
    /// Lists written before timestamps were tracked load with the epoch
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// Form input for a new reminder.
///
/// `datetime` accepts RFC 3339 or a local `YYYY-MM-DDTHH:MM` value as produced
/// by a `datetime-local` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    pub title: String,
    pub datetime: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReminderRequest {
    pub title: Option<String>,
    pub datetime: Option<String>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
}
