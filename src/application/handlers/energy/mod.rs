//! Energy handlers - consumption log, dashboard summary and devices.

mod get_consumption_summary;
mod list_devices;
mod record_consumption;
mod register_device;

pub use get_consumption_summary::{GetConsumptionSummaryHandler, GetConsumptionSummaryQuery};
pub use list_devices::{ListDevicesHandler, ListDevicesQuery};
pub use record_consumption::{
    RecordConsumptionCommand, RecordConsumptionHandler, RecordConsumptionResult,
};
pub use register_device::{RegisterDeviceCommand, RegisterDeviceHandler, RegisterDeviceResult};
