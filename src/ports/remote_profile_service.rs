//! Remote Profile Service Port - the account's stored accessibility profile.

use async_trait::async_trait;

use crate::domain::accessibility::AccessibilityProfile;
use crate::domain::foundation::UserId;

/// Errors from the hosted profile service
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteProfileError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authorized to access profile")]
    Unauthorized,

    #[error("Profile service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl RemoteProfileError {
    pub fn network(msg: impl Into<String>) -> Self {
        RemoteProfileError::Network(msg.into())
    }
}

/// Port for the server-of-record accessibility profile
#[async_trait]
pub trait RemoteProfileService: Send + Sync {
    /// The stored profile, or `None` when the account has no record.
    async fn fetch(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccessibilityProfile>, RemoteProfileError>;

    /// Overwrite the stored profile.
    async fn update(
        &self,
        user_id: &UserId,
        profile: AccessibilityProfile,
    ) -> Result<(), RemoteProfileError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_includes_code_and_body() {
        let err = RemoteProfileError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("maintenance"));
    }
}
