//! Usability metric entries.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::domain::foundation::{MetricId, Timestamp, UserId, ValidationError};

/// What the user did on a form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetricAction {
    PageView,
    Click,
    TimeSpent,
    ProfileView,
    ProfileUpdate,
    /// Any other action name a screen chooses to record.
    Custom(String),
}

impl MetricAction {
    pub fn as_str(&self) -> &str {
        match self {
            MetricAction::PageView => "page_view",
            MetricAction::Click => "click",
            MetricAction::TimeSpent => "time_spent",
            MetricAction::ProfileView => "profile_view",
            MetricAction::ProfileUpdate => "profile_update",
            MetricAction::Custom(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "page_view" => MetricAction::PageView,
            "click" => MetricAction::Click,
            "time_spent" => MetricAction::TimeSpent,
            "profile_view" => MetricAction::ProfileView,
            "profile_update" => MetricAction::ProfileUpdate,
            other => MetricAction::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for MetricAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MetricAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MetricAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(MetricAction::from_name(&raw))
    }
}

/// One recorded interaction. Anonymous visitors have no `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsabilityMetric {
    pub id: MetricId,
    pub user_id: Option<UserId>,
    /// Screen or form the interaction happened on, e.g. `dashboard`.
    pub form: String,
    pub action: MetricAction,
    pub metadata: Option<Value>,
    pub timestamp: Timestamp,
}

impl UsabilityMetric {
    pub fn new(
        user_id: Option<UserId>,
        form: impl Into<String>,
        action: MetricAction,
        metadata: Option<Value>,
    ) -> Result<Self, ValidationError> {
        let form = form.into();
        if form.trim().is_empty() {
            return Err(ValidationError::empty_field("form"));
        }
        if action.as_str().trim().is_empty() {
            return Err(ValidationError::empty_field("action"));
        }
        Ok(Self {
            id: MetricId::new(),
            user_id,
            form,
            action,
            metadata,
            timestamp: Timestamp::now(),
        })
    }

    /// Who did it, as shown in the admin table.
    pub fn actor_label(&self) -> &str {
        self.user_id.as_ref().map(UserId::short).unwrap_or("anonymous")
    }
}
