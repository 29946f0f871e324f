//! Account module - the user's row on the hosted `profiles` table.

use serde::{Deserialize, Serialize};

use crate::domain::accessibility::AccessibilityProfile;
use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Minimum length of a display name after trimming.
pub const MIN_DISPLAY_NAME_LEN: usize = 2;

/// A trimmed, non-trivial display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_DISPLAY_NAME_LEN {
            return Err(ValidationError::too_short("display_name", MIN_DISPLAY_NAME_LEN));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Account details the user can see and edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<DisplayName>,
    pub accessibility_profile: AccessibilityProfile,
    pub updated_at: Timestamp,
}

impl Account {
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: None,
            accessibility_profile: AccessibilityProfile::None,
            updated_at: Timestamp::now(),
        }
    }

    /// Whether `name` differs from the stored display name.
    pub fn is_renamed_to(&self, name: &DisplayName) -> bool {
        self.display_name.as_ref() != Some(name)
    }

    pub fn rename(&mut self, name: DisplayName) {
        self.display_name = Some(name);
        self.updated_at = Timestamp::now();
    }
}
