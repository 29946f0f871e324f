//! Accessibility profile value object.
//!
//! A closed set of presentation presets. The wire names (device storage and the
//! remote `perfil_accesibilidad` column) are the Spanish identifiers the hosted
//! schema was created with; English names are accepted when parsing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Accessibility profile active for a user or anonymous session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessibilityProfile {
    /// Standard interface, no adaptations.
    #[default]
    None,
    /// Larger text and boosted contrast.
    Visual,
    /// Reinforced visual alerts, slower animations.
    Auditory,
    /// Larger click targets and interactive spacing.
    Motor,
    /// Narrower content and taller line height.
    Cognitive,
}

impl AccessibilityProfile {
    /// Every variant, in menu order.
    pub const ALL: [AccessibilityProfile; 5] = [
        AccessibilityProfile::None,
        AccessibilityProfile::Visual,
        AccessibilityProfile::Auditory,
        AccessibilityProfile::Motor,
        AccessibilityProfile::Cognitive,
    ];

    /// Name written to device storage and the remote profile record.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AccessibilityProfile::None => "ninguna",
            AccessibilityProfile::Visual => "visual",
            AccessibilityProfile::Auditory => "auditiva",
            AccessibilityProfile::Motor => "motriz",
            AccessibilityProfile::Cognitive => "cognitiva",
        }
    }

    /// Label shown in the accessibility menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            AccessibilityProfile::None => "None",
            AccessibilityProfile::Visual => "Visual impairment",
            AccessibilityProfile::Auditory => "Hearing impairment",
            AccessibilityProfile::Motor => "Motor impairment",
            AccessibilityProfile::Cognitive => "Cognitive impairment",
        }
    }

    /// Decodes a stored value, falling back to `None` for anything unrecognized.
    ///
    /// Stored values come from device storage or the remote record and are
    /// never trusted to be well-formed.
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn is_none(&self) -> bool {
        matches!(self, AccessibilityProfile::None)
    }
}

impl FromStr for AccessibilityProfile {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ninguna" | "none" => Ok(AccessibilityProfile::None),
            "visual" => Ok(AccessibilityProfile::Visual),
            "auditiva" | "auditory" => Ok(AccessibilityProfile::Auditory),
            "motriz" | "motor" => Ok(AccessibilityProfile::Motor),
            "cognitiva" | "cognitive" => Ok(AccessibilityProfile::Cognitive),
            other => Err(ValidationError::invalid_format(
                "accessibility_profile",
                format!("unknown profile '{}'", other),
            )),
        }
    }
}

impl fmt::Display for AccessibilityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl Serialize for AccessibilityProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for AccessibilityProfile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(AccessibilityProfile::from_stored(&raw))
    }
}
