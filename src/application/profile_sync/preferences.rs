//! Typed access to the device preference store.
//!
//! Storage problems never reach the caller: a failed read is an absent value
//! and a failed write is dropped, both with a `warn` log.

use std::sync::Arc;
use tracing::warn;

use crate::domain::accessibility::{AccessibilityProfile, Language, ThemePreference};
use crate::ports::{PreferenceKey, PreferenceStore};

#[derive(Clone)]
pub struct DevicePreferences {
    store: Arc<dyn PreferenceStore>,
}

impl DevicePreferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Stored profile. A present but unrecognized value reads as `None` profile.
    pub async fn profile(&self) -> Option<AccessibilityProfile> {
        self.read(PreferenceKey::AccessibilityProfile)
            .await
            .map(|raw| AccessibilityProfile::from_stored(&raw))
    }

    pub async fn save_profile(&self, profile: AccessibilityProfile) {
        self.write(PreferenceKey::AccessibilityProfile, profile.wire_name())
            .await;
    }

    /// Raw theme entry; resolution against the system default is the caller's.
    pub async fn theme(&self) -> Option<String> {
        self.read(PreferenceKey::Theme).await
    }

    pub async fn save_theme(&self, theme: ThemePreference) {
        self.write(PreferenceKey::Theme, theme.as_str()).await;
    }

    pub async fn language(&self) -> Option<String> {
        self.read(PreferenceKey::Language).await
    }

    pub async fn save_language(&self, language: Language) {
        self.write(PreferenceKey::Language, language.code()).await;
    }

    async fn read(&self, key: PreferenceKey) -> Option<String> {
        match self.store.read(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Preference read failed, treating as absent");
                None
            }
        }
    }

    async fn write(&self, key: PreferenceKey, value: &str) {
        if let Err(e) = self.store.write(key, value).await {
            warn!(key = %key, error = %e, "Preference write failed");
        }
    }
}
