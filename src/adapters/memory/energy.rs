//! In-memory consumption and device repositories.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::energy::{ConsumptionRecord, Device};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{ConsumptionRepository, DeviceRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryConsumptionRepository {
    records: Arc<RwLock<Vec<ConsumptionRecord>>>,
}

impl InMemoryConsumptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ConsumptionRepository for InMemoryConsumptionRepository {
    async fn insert(&self, record: &ConsumptionRecord) -> Result<(), DomainError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ConsumptionRecord>, DomainError> {
        let mut mine: Vec<ConsumptionRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by_key(|r| r.date);
        let skip = mine.len().saturating_sub(limit);
        Ok(mine.split_off(skip))
    }

    async fn total_kwh_all_users(&self) -> Result<f64, DomainError> {
        Ok(self.records.read().await.iter().map(|r| r.kwh.value()).sum())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDeviceRepository {
    devices: Arc<RwLock<Vec<Device>>>,
}

impl InMemoryDeviceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceRepository for InMemoryDeviceRepository {
    async fn insert(&self, device: &Device) -> Result<(), DomainError> {
        self.devices.write().await.push(device.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Device>, DomainError> {
        Ok(self
            .devices
            .read()
            .await
            .iter()
            .filter(|d| &d.user_id == user_id)
            .cloned()
            .collect())
    }
}
