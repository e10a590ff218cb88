//! Application configuration.
//!
//! Settings live in an optional `config.yaml` inside the data directory. The
//! data directory itself comes from `PET_CARE_DATA_DIR`, or defaults to
//! `~/Documents/Pet Care Tracker` (following a `.pet_care_redirect` file there
//! when one points at an existing directory).

use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::domain::NotificationSettings;

pub const DATA_DIR_ENV: &str = "PET_CARE_DATA_DIR";
pub const CONFIG_FILE_NAME: &str = "config.yaml";
const DEFAULT_DIR_NAME: &str = "Pet Care Tracker";
const REDIRECT_FILE_NAME: &str = ".pet_care_redirect";

/// Mirrors the 5 MiB a browser typically grants local storage
pub const DEFAULT_STORAGE_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the entity lists are stored; relative paths are taken from the
    /// directory holding `config.yaml`
    pub data_directory: PathBuf,
    /// Total bytes all stored lists may occupy; `null` disables the limit
    pub storage_quota_bytes: Option<u64>,
    pub notification_title: String,
    pub notification_icon: Option<String>,
    pub notifications_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let notification = NotificationSettings::default();
        Self {
            data_directory: PathBuf::new(),
            storage_quota_bytes: Some(DEFAULT_STORAGE_QUOTA_BYTES),
            notification_title: notification.title,
            notification_icon: notification.icon,
            notifications_enabled: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment-selected or default data directory
    pub fn load() -> Result<Self> {
        let data_directory = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) => {
                let dir = PathBuf::from(dir);
                info!("Using data directory from {}: {}", DATA_DIR_ENV, dir.display());
                dir
            }
            None => Self::default_data_directory()?,
        };
        Self::load_from(data_directory)
    }

    /// Load `config.yaml` from `directory`, falling back to defaults when absent
    pub fn load_from<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref();
        let config_path = directory.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            if contents.trim().is_empty() {
                Self::default()
            } else {
                serde_yaml::from_str(&contents)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?
            }
        } else {
            info!("No {} found in {}, using defaults", CONFIG_FILE_NAME, directory.display());
            Self::default()
        };

        if config.data_directory.as_os_str().is_empty() {
            config.data_directory = directory.to_path_buf();
        } else if config.data_directory.is_relative() {
            config.data_directory = directory.join(&config.data_directory);
        }

        Ok(config)
    }

    /// `~/Documents/Pet Care Tracker`, or wherever its redirect file points
    pub fn default_data_directory() -> Result<PathBuf> {
        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .context("Could not determine documents directory")?;

        Ok(follow_redirect(documents_dir.join(DEFAULT_DIR_NAME)))
    }

    pub fn notification_settings(&self) -> NotificationSettings {
        NotificationSettings {
            title: self.notification_title.clone(),
            icon: self.notification_icon.clone(),
        }
    }
}

/// Resolve a `.pet_care_redirect` file inside `default_dir`
pub fn follow_redirect(default_dir: PathBuf) -> PathBuf {
    let redirect_file = default_dir.join(REDIRECT_FILE_NAME);
    if !redirect_file.exists() {
        info!("No redirect file found, using data directory: {}", default_dir.display());
        return default_dir;
    }

    match fs::read_to_string(&redirect_file) {
        Ok(redirected_path) => {
            let redirected_path = redirected_path.trim();
            let path = PathBuf::from(redirected_path);
            if path.is_dir() {
                info!("Found redirect file, using data directory: {}", path.display());
                path
            } else {
                warn!(
                    "Redirect file points to non-existent directory: {}. Using default.",
                    redirected_path
                );
                default_dir
            }
        }
        Err(e) => {
            error!("Failed to read redirect file: {}. Using default directory.", e);
            default_dir
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(dir.path()).unwrap();

        assert_eq!(config.data_directory, dir.path());
        assert_eq!(config.storage_quota_bytes, Some(DEFAULT_STORAGE_QUOTA_BYTES));
        assert_eq!(config.notification_title, "Pet Care Reminder");
        assert_eq!(config.notification_icon.as_deref(), Some("/favicon.ico"));
        assert!(config.notifications_enabled);
    }

    #[test]
    fn test_partial_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "notification_title: Walkies\nstorage_quota_bytes: null\nnotifications_enabled: false\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.notification_title, "Walkies");
        assert_eq!(config.storage_quota_bytes, None);
        assert!(!config.notifications_enabled);
        assert_eq!(config.notification_icon.as_deref(), Some("/favicon.ico"));

        let settings = config.notification_settings();
        assert_eq!(settings.title, "Walkies");
    }

    #[test]
    fn test_relative_data_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "data_directory: lists\n").unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.data_directory, dir.path().join("lists"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "storage_quota_bytes: [oops\n").unwrap();

        let err = AppConfig::load_from(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_follow_redirect() {
        let default_dir = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();

        assert_eq!(follow_redirect(default_dir.path().to_path_buf()), default_dir.path());

        fs::write(
            default_dir.path().join(REDIRECT_FILE_NAME),
            format!("{}\n", target.path().display()),
        )
        .unwrap();
        assert_eq!(follow_redirect(default_dir.path().to_path_buf()), target.path());
    }

    #[test]
    fn test_redirect_to_missing_directory_ignored() {
        let default_dir = TempDir::new().unwrap();
        fs::write(default_dir.path().join(REDIRECT_FILE_NAME), "/definitely/not/here").unwrap();

        assert_eq!(follow_redirect(default_dir.path().to_path_buf()), default_dir.path());
    }
}
