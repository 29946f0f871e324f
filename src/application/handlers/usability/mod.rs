//! Usability handlers - interaction tracking and the admin overview.

mod get_admin_overview;
mod tracker;

pub use get_admin_overview::{GetAdminOverviewHandler, GetAdminOverviewQuery};
pub use tracker::UsabilityTracker;
