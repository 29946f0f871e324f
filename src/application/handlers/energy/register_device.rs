//! RegisterDeviceHandler - Command handler for adding a device.
//!
//! When the user says how many hours a day the device runs, an initial
//! consumption record for today is estimated from its rated power.

use std::sync::Arc;
use tracing::debug;

use crate::domain::energy::{ConsumptionRecord, Device};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{ConsumptionRepository, DeviceRepository};

/// Command to register a device.
#[derive(Debug, Clone)]
pub struct RegisterDeviceCommand {
    pub user_id: UserId,
    pub name: String,
    pub rated_power_watts: u32,
    pub hours_per_day: Option<f64>,
}

/// Result of device registration.
#[derive(Debug, Clone)]
pub struct RegisterDeviceResult {
    pub device: Device,
    pub initial_record: Option<ConsumptionRecord>,
}

/// Handler for registering devices.
pub struct RegisterDeviceHandler {
    devices: Arc<dyn DeviceRepository>,
    consumption: Arc<dyn ConsumptionRepository>,
}

impl RegisterDeviceHandler {
    pub fn new(
        devices: Arc<dyn DeviceRepository>,
        consumption: Arc<dyn ConsumptionRepository>,
    ) -> Self {
        Self {
            devices,
            consumption,
        }
    }

    pub async fn handle(&self, cmd: RegisterDeviceCommand) -> Result<RegisterDeviceResult, DomainError> {
        let device = Device::new(cmd.user_id, cmd.name, cmd.rated_power_watts)?;

        // Validate the estimate before anything is written.
        let estimate = cmd
            .hours_per_day
            .map(|hours| device.estimated_daily_kwh(hours))
            .transpose()?;

        self.devices.insert(&device).await?;
        debug!(user_id = %device.user_id.short(), device = %device.name, "Device registered");

        let initial_record = match estimate {
            Some(kwh) => {
                let today = Timestamp::now().date();
                let record = ConsumptionRecord::new(device.user_id.clone(), today, kwh, today)?
                    .with_device(device.id);
                self.consumption.insert(&record).await?;
                Some(record)
            }
            None => None,
        };

        Ok(RegisterDeviceResult {
            device,
            initial_record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryConsumptionRepository, InMemoryDeviceRepository};
    use crate::domain::foundation::ErrorCode;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn command(name: &str, watts: u32, hours: Option<f64>) -> RegisterDeviceCommand {
        RegisterDeviceCommand {
            user_id: user(),
            name: name.to_string(),
            rated_power_watts: watts,
            hours_per_day: hours,
        }
    }

    fn setup() -> (
        RegisterDeviceHandler,
        InMemoryDeviceRepository,
        InMemoryConsumptionRepository,
    ) {
        let devices = InMemoryDeviceRepository::new();
        let consumption = InMemoryConsumptionRepository::new();
        let handler =
            RegisterDeviceHandler::new(Arc::new(devices.clone()), Arc::new(consumption.clone()));
        (handler, devices, consumption)
    }

    #[tokio::test]
    async fn registers_device_without_estimate() {
        let (handler, devices, consumption) = setup();

        let result = handler.handle(command("Fridge", 150, None)).await.unwrap();

        assert!(result.initial_record.is_none());
        assert_eq!(devices.list_for_user(&user()).await.unwrap().len(), 1);
        assert_eq!(consumption.len().await, 0);
    }

    #[tokio::test]
    async fn estimate_creates_todays_record_for_device() {
        let (handler, _, consumption) = setup();

        let result = handler
            .handle(command("Heater", 2000, Some(3.0)))
            .await
            .unwrap();

        let record = result.initial_record.unwrap();
        assert_eq!(record.kwh.value(), 6.0);
        assert_eq!(record.device_id, Some(result.device.id));
        assert_eq!(record.date, Timestamp::now().date());
        assert_eq!(consumption.len().await, 1);
    }

    #[tokio::test]
    async fn invalid_hours_write_nothing() {
        let (handler, devices, _) = setup();

        let err = handler
            .handle(command("Heater", 2000, Some(30.0)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(devices.list_for_user(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let (handler, _, _) = setup();
        let err = handler.handle(command("  ", 100, None)).await.unwrap_err();
        assert_eq!(err.details.get("field").map(String::as_str), Some("name"));
    }
}
