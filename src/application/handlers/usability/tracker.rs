//! UsabilityTracker - records interactions for one form.
//!
//! Tracking must never break the screen it instruments, so every failure is
//! logged and swallowed. Each method reports whether the metric was stored.

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::usability::{MetricAction, UsabilityMetric};
use crate::ports::MetricsRecorder;

#[derive(Clone)]
pub struct UsabilityTracker {
    recorder: Arc<dyn MetricsRecorder>,
    form: String,
}

impl UsabilityTracker {
    pub fn new(recorder: Arc<dyn MetricsRecorder>, form: impl Into<String>) -> Self {
        Self {
            recorder,
            form: form.into(),
        }
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub async fn track(
        &self,
        user_id: Option<&UserId>,
        action: MetricAction,
        metadata: Option<Value>,
    ) -> bool {
        let metric = match UsabilityMetric::new(user_id.cloned(), self.form.clone(), action, metadata) {
            Ok(metric) => metric,
            Err(e) => {
                warn!(form = %self.form, error = %e, "Invalid usability metric dropped");
                return false;
            }
        };

        match self.recorder.record(&metric).await {
            Ok(()) => true,
            Err(e) => {
                warn!(form = %self.form, action = %metric.action, error = %e, "Failed to record usability metric");
                false
            }
        }
    }

    pub async fn track_page_view(&self, user_id: Option<&UserId>) -> bool {
        let metadata = json!({ "timestamp": Timestamp::now().to_rfc3339() });
        self.track(user_id, MetricAction::PageView, Some(metadata)).await
    }

    pub async fn track_click(&self, user_id: Option<&UserId>, element: &str) -> bool {
        let metadata = json!({
            "elemento": element,
            "timestamp": Timestamp::now().to_rfc3339(),
        });
        self.track(user_id, MetricAction::Click, Some(metadata)).await
    }

    /// Zero seconds is not worth a row and is skipped.
    pub async fn track_time_spent(&self, user_id: Option<&UserId>, seconds: u64) -> bool {
        if seconds == 0 {
            return false;
        }
        let metadata = json!({
            "seconds": seconds,
            "timestamp": Timestamp::now().to_rfc3339(),
        });
        self.track(user_id, MetricAction::TimeSpent, Some(metadata)).await
    }
}
