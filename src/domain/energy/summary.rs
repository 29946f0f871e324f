//! Dashboard aggregates over a user's consumption history.

use chrono::NaiveDate;
use serde::Serialize;

use super::ConsumptionRecord;

/// Number of most recent records the dashboard charts.
pub const DASHBOARD_HISTORY_LIMIT: usize = 30;

/// One point of the consumption chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub kwh: f64,
}

/// Totals shown on the consumption dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionSummary {
    pub record_count: usize,
    pub total_kwh: f64,
    /// Mean per recorded day; zero when there are no records.
    pub average_kwh: f64,
    /// Chart points in ascending date order.
    pub points: Vec<ChartPoint>,
}

impl ConsumptionSummary {
    pub fn from_records(records: &[ConsumptionRecord]) -> Self {
        let mut points: Vec<ChartPoint> = records
            .iter()
            .map(|r| ChartPoint {
                date: r.date,
                kwh: r.kwh.value(),
            })
            .collect();
        points.sort_by_key(|p| p.date);

        let total_kwh: f64 = points.iter().map(|p| p.kwh).sum();
        let average_kwh = if points.is_empty() {
            0.0
        } else {
            total_kwh / points.len() as f64
        };

        Self {
            record_count: points.len(),
            total_kwh,
            average_kwh,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}
