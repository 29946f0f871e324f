//! In-memory adapters for the hosted data ports.
//!
//! Used by tests and by offline/demo sessions that have no backend.

mod account;
mod energy;
mod remote_profile;
mod usability;

pub use account::InMemoryAccountRepository;
pub use energy::{InMemoryConsumptionRepository, InMemoryDeviceRepository};
pub use remote_profile::InMemoryRemoteProfileService;
pub use usability::{InMemoryMetricsStore, InMemoryRoleChecker};
