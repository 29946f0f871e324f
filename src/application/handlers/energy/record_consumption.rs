//! RecordConsumptionHandler - Command handler for logging a day's consumption.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

use crate::application::handlers::usability::UsabilityTracker;
use crate::domain::energy::{ConsumptionRecord, Kwh};
use crate::domain::foundation::{DeviceId, DomainError, UserId};
use crate::ports::ConsumptionRepository;

/// Command to record consumption for one day.
#[derive(Debug, Clone)]
pub struct RecordConsumptionCommand {
    pub user_id: UserId,
    pub date: NaiveDate,
    /// Raw form input, e.g. `"12.5"`.
    pub kwh: String,
    pub device_id: Option<DeviceId>,
}

/// Result of a recorded consumption entry.
#[derive(Debug, Clone)]
pub struct RecordConsumptionResult {
    pub record: ConsumptionRecord,
}

/// Handler for recording consumption.
pub struct RecordConsumptionHandler {
    repository: Arc<dyn ConsumptionRepository>,
    tracker: UsabilityTracker,
}

impl RecordConsumptionHandler {
    pub fn new(repository: Arc<dyn ConsumptionRepository>, tracker: UsabilityTracker) -> Self {
        Self {
            repository,
            tracker,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecordConsumptionCommand,
    ) -> Result<RecordConsumptionResult, DomainError> {
        // The submit click counts even when the input is rejected.
        self.tracker
            .track_click(Some(&cmd.user_id), "add_consumption")
            .await;

        let kwh = Kwh::parse(&cmd.kwh)?;
        let mut record = ConsumptionRecord::for_today_or_earlier(cmd.user_id, cmd.date, kwh)?;
        if let Some(device_id) = cmd.device_id {
            record = record.with_device(device_id);
        }

        self.repository.insert(&record).await?;
        debug!(user_id = %record.user_id.short(), date = %record.date, kwh = %record.kwh, "Consumption recorded");

        Ok(RecordConsumptionResult { record })
    }
}
