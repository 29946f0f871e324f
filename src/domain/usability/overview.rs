//! Administrator overview of platform activity.

use serde::Serialize;

use super::UsabilityMetric;

/// Number of recent metrics the admin table lists.
pub const RECENT_METRICS_LIMIT: usize = 50;

/// Figures shown on the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminOverview {
    pub total_users: u64,
    pub total_metrics: u64,
    pub total_consumption_kwh: f64,
    /// Newest first, at most [`RECENT_METRICS_LIMIT`].
    pub recent_metrics: Vec<UsabilityMetric>,
}

impl AdminOverview {
    pub fn new(
        total_users: u64,
        total_metrics: u64,
        total_consumption_kwh: f64,
        mut recent_metrics: Vec<UsabilityMetric>,
    ) -> Self {
        recent_metrics.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent_metrics.truncate(RECENT_METRICS_LIMIT);
        Self {
            total_users,
            total_metrics,
            total_consumption_kwh,
            recent_metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::usability::MetricAction;

    #[test]
    fn overview_orders_newest_first_and_caps_list() {
        let metrics: Vec<_> = (0..60)
            .map(|_| UsabilityMetric::new(None, "home", MetricAction::PageView, None).unwrap())
            .collect();
        let newest = metrics.last().unwrap().timestamp;

        let overview = AdminOverview::new(3, 60, 12.5, metrics);

        assert_eq!(overview.recent_metrics.len(), RECENT_METRICS_LIMIT);
        assert_eq!(overview.recent_metrics[0].timestamp, newest);
        assert_eq!(overview.total_metrics, 60);
    }
}
