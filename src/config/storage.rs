//! Device storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where device preferences are kept between runs.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the preference store
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.preferences_path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidPreferencesPath);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            preferences_path: default_preferences_path(),
        }
    }
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("./data/preferences.json")
}
