//! Energy module - consumption records, devices and dashboard aggregates.

mod device;
mod record;
mod summary;

pub use device::{Device, MAX_RATED_POWER_WATTS};
pub use record::{ConsumptionRecord, Kwh};
pub use summary::{ChartPoint, ConsumptionSummary, DASHBOARD_HISTORY_LIMIT};
