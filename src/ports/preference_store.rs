//! Preference Store Port - on-device key-value persistence.
//!
//! Values are opaque strings. Absence (`Ok(None)`) is a normal result and is
//! distinct from every stored value. Implementations must survive process
//! restarts; callers treat every error as "absent".

use async_trait::async_trait;
use std::fmt;

/// Keys the client persists on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PreferenceKey {
    AccessibilityProfile,
    Theme,
    Language,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 3] = [
        PreferenceKey::AccessibilityProfile,
        PreferenceKey::Theme,
        PreferenceKey::Language,
    ];

    /// Storage key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::AccessibilityProfile => "accessibility_perfil",
            PreferenceKey::Theme => "theme",
            PreferenceKey::Language => "app_lang",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during preference storage operations
#[derive(Debug, thiserror::Error)]
pub enum PreferenceStoreError {
    #[error("Preference storage is unavailable")]
    Unavailable,

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Preference file is corrupt: {0}")]
    Corrupt(String),
}

/// Port for reading and writing device preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read a value; `Ok(None)` when nothing is stored under `key`.
    async fn read(&self, key: PreferenceKey) -> Result<Option<String>, PreferenceStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: PreferenceKey, value: &str) -> Result<(), PreferenceStoreError>;

    /// Forget the value under `key`. Removing an absent key succeeds.
    async fn remove(&self, key: PreferenceKey) -> Result<(), PreferenceStoreError>;
}
