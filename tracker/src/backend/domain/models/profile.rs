//! Pet profile entity rules.
use chrono::{DateTime, Utc};
use shared::{CreateProfileRequest, Profile, UpdateProfileRequest};

use super::validation::{required, ValidationError};
use crate::backend::storage::Entity;

fn clean(value: &str) -> String {
    value.trim().to_string()
}

/// Empty photo text means "no photo"
fn clean_photo(photo: Option<String>) -> Option<String> {
    photo.filter(|p| !p.trim().is_empty())
}

impl Entity for Profile {
    type Draft = CreateProfileRequest;
    type Changes = UpdateProfileRequest;

    const STORAGE_KEY: &'static str = "pet_profiles";
    const KIND: &'static str = "pet profile";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: CreateProfileRequest, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let name = required("name", &draft.name)?;

        Ok(Profile {
            id,
            name,
            breed: clean(&draft.breed),
            age: clean(&draft.age),
            weight: clean(&draft.weight),
            photo: clean_photo(draft.photo),
            medical_history: clean(&draft.medical_history),
            vaccinations: clean(&draft.vaccinations),
            notes: clean(&draft.notes),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply_changes(&mut self, changes: UpdateProfileRequest, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if let Some(name) = &changes.name {
            self.name = required("name", name)?;
        }
        if let Some(breed) = &changes.breed {
            self.breed = clean(breed);
        }
        if let Some(age) = &changes.age {
            self.age = clean(age);
        }
        if let Some(weight) = &changes.weight {
            self.weight = clean(weight);
        }
        // A new photo replaces the old one; no photo in the edit keeps it
        if let Some(photo) = clean_photo(changes.photo) {
            self.photo = Some(photo);
        }
        if let Some(history) = &changes.medical_history {
            self.medical_history = clean(history);
        }
        if let Some(vaccinations) = &changes.vaccinations {
            self.vaccinations = clean(vaccinations);
        }
        if let Some(notes) = &changes.notes {
            self.notes = clean(notes);
        }

        self.updated_at = now;
        Ok(())
    }
}
