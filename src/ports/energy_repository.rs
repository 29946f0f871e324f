//! Ports for consumption records and devices

use async_trait::async_trait;

use crate::domain::energy::{ConsumptionRecord, Device};
use crate::domain::foundation::{DomainError, UserId};

/// Repository for daily consumption records
#[async_trait]
pub trait ConsumptionRepository: Send + Sync {
    /// Store a new record
    async fn insert(&self, record: &ConsumptionRecord) -> Result<(), DomainError>;

    /// The user's `limit` most recent records in ascending date order
    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ConsumptionRecord>, DomainError>;

    /// Sum of every user's recorded consumption (admin only)
    async fn total_kwh_all_users(&self) -> Result<f64, DomainError>;
}

/// Repository for registered devices
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Store a new device
    async fn insert(&self, device: &Device) -> Result<(), DomainError>;

    /// Devices owned by the user, in registration order
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Device>, DomainError>;
}
