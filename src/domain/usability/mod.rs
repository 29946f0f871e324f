//! Usability module - interaction metrics and the admin overview.

mod metric;
mod overview;

pub use metric::{MetricAction, UsabilityMetric};
pub use overview::{AdminOverview, RECENT_METRICS_LIMIT};
