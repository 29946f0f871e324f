//! ListDevicesHandler - Query handler for a user's devices.

use std::sync::Arc;

use crate::domain::energy::Device;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::DeviceRepository;

#[derive(Debug, Clone)]
pub struct ListDevicesQuery {
    pub user_id: UserId,
}

pub struct ListDevicesHandler {
    devices: Arc<dyn DeviceRepository>,
}

impl ListDevicesHandler {
    pub fn new(devices: Arc<dyn DeviceRepository>) -> Self {
        Self { devices }
    }

    pub async fn handle(&self, query: ListDevicesQuery) -> Result<Vec<Device>, DomainError> {
        self.devices.list_for_user(&query.user_id).await
    }
}
