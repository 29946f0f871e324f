//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Profile Sync Ports
//!
//! - `PreferenceStore` - On-device key-value storage
//! - `RemoteProfileService` - The account's stored accessibility profile
//! - `StyleTarget` - Document root the applied profile is rendered on
//!
//! ## Hosted Data Ports
//!
//! - `AccountRepository` - Account records
//! - `ConsumptionRepository` / `DeviceRepository` - Energy data
//! - `MetricsRecorder` / `MetricsReader` / `RoleChecker` - Usability metrics and admin access

mod account_repository;
mod energy_repository;
mod preference_store;
mod remote_profile_service;
mod style_target;
mod usability_metrics;

pub use account_repository::AccountRepository;
pub use energy_repository::{ConsumptionRepository, DeviceRepository};
pub use preference_store::{PreferenceKey, PreferenceStore, PreferenceStoreError};
pub use remote_profile_service::{RemoteProfileError, RemoteProfileService};
pub use style_target::StyleTarget;
pub use usability_metrics::{MetricsReader, MetricsRecorder, RoleChecker};
