//! Application layer - Commands, Queries, Handlers and the profile session.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! `profile_sync` owns the accessibility profile for the running session;
//! `handlers` holds the command (write) and query (read) handlers.

pub mod handlers;
pub mod profile_sync;

pub use handlers::{
    // Account handlers
    GetAccountHandler, GetAccountQuery, UpdateDisplayNameCommand, UpdateDisplayNameHandler,
    UpdateDisplayNameResult,
    // Energy handlers
    GetConsumptionSummaryHandler, GetConsumptionSummaryQuery, ListDevicesHandler,
    ListDevicesQuery, RecordConsumptionCommand, RecordConsumptionHandler,
    RecordConsumptionResult, RegisterDeviceCommand, RegisterDeviceHandler, RegisterDeviceResult,
    // Usability handlers
    GetAdminOverviewHandler, GetAdminOverviewQuery, UsabilityTracker,
};
pub use profile_sync::{
    DevicePreferences, ProfileSnapshot, ProfileSync, RemoteSync, Resolution, StyleApplicator,
};
