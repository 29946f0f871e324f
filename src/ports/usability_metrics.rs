//! Ports for usability metrics and role lookups

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::usability::UsabilityMetric;

/// Write side of the usability metrics table
#[async_trait]
pub trait MetricsRecorder: Send + Sync {
    async fn record(&self, metric: &UsabilityMetric) -> Result<(), DomainError>;
}

/// Read side of the usability metrics table (admin only)
#[async_trait]
pub trait MetricsReader: Send + Sync {
    /// Newest first
    async fn recent(&self, limit: usize) -> Result<Vec<UsabilityMetric>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Looks up a user's administrative role
#[async_trait]
pub trait RoleChecker: Send + Sync {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, DomainError>;
}
