//! Profile service: the profile repository plus asynchronous photo decoding.
//!
//! A profile submitted with a photo file is not persisted until the file has
//! been read and encoded.

use log::info;
use shared::{CreateProfileRequest, Profile, UpdateProfileRequest};
use std::path::Path;

use super::models::validation::required;
use super::photo::{read_photo_as_data_url, PhotoError};
use crate::backend::storage::{Repository, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Photo(#[from] PhotoError),
}

#[derive(Clone)]
pub struct ProfileService {
    repository: Repository<Profile>,
}

impl ProfileService {
    pub fn new(repository: Repository<Profile>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Vec<Profile> {
        self.repository.list()
    }

    pub fn get(&self, id: i64) -> Option<Profile> {
        self.repository.get(id)
    }

    pub fn create(&self, draft: CreateProfileRequest) -> Result<Profile, RepositoryError> {
        self.repository.create(draft)
    }

    pub fn update(&self, id: i64, changes: UpdateProfileRequest) -> Result<Profile, RepositoryError> {
        self.repository.update(id, changes)
    }

    pub fn delete(&self, id: i64) -> Result<Vec<Profile>, RepositoryError> {
        self.repository.delete(id)
    }

    /// Create a profile whose photo is read from `photo_path`.
    /// The name is checked before the file is touched.
    pub async fn create_with_photo(
        &self,
        mut draft: CreateProfileRequest,
        photo_path: &Path,
    ) -> Result<Profile, ProfileError> {
        required("name", &draft.name).map_err(RepositoryError::from)?;

        draft.photo = Some(read_photo_as_data_url(photo_path).await?);
        let profile = self.repository.create(draft)?;

        info!("Created profile {} with photo from {}", profile.id, photo_path.display());
        Ok(profile)
    }

    /// Update a profile and replace its photo with the file at `photo_path`
    pub async fn update_with_photo(
        &self,
        id: i64,
        mut changes: UpdateProfileRequest,
        photo_path: &Path,
    ) -> Result<Profile, ProfileError> {
        if self.repository.get(id).is_none() {
            return Err(RepositoryError::NotFound { kind: "pet profile", id }.into());
        }
        if let Some(name) = &changes.name {
            required("name", name).map_err(RepositoryError::from)?;
        }

        changes.photo = Some(read_photo_as_data_url(photo_path).await?);
        Ok(self.repository.update(id, changes)?)
    }
}
