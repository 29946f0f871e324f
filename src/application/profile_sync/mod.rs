//! Profile synchronization between the device, the account and the screen.

mod applicator;
mod preferences;
mod session;

pub use applicator::StyleApplicator;
pub use preferences::DevicePreferences;
pub use session::{ProfileSnapshot, ProfileSync, RemoteSync, Resolution};
