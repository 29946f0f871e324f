//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod account;
pub mod energy;
pub mod usability;

pub use account::{
    GetAccountHandler, GetAccountQuery, UpdateDisplayNameCommand, UpdateDisplayNameHandler,
    UpdateDisplayNameResult,
};
pub use energy::{
    GetConsumptionSummaryHandler, GetConsumptionSummaryQuery, ListDevicesHandler,
    ListDevicesQuery, RecordConsumptionCommand, RecordConsumptionHandler,
    RecordConsumptionResult, RegisterDeviceCommand, RegisterDeviceHandler, RegisterDeviceResult,
};
pub use usability::{GetAdminOverviewHandler, GetAdminOverviewQuery, UsabilityTracker};
