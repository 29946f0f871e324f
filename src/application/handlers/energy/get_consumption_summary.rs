//! GetConsumptionSummaryHandler - Query handler for the consumption dashboard.

use std::sync::Arc;

use crate::domain::energy::{ConsumptionSummary, DASHBOARD_HISTORY_LIMIT};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ConsumptionRepository;

/// Query for a user's dashboard summary.
#[derive(Debug, Clone)]
pub struct GetConsumptionSummaryQuery {
    pub user_id: UserId,
}

/// Handler for the dashboard summary.
pub struct GetConsumptionSummaryHandler {
    repository: Arc<dyn ConsumptionRepository>,
}

impl GetConsumptionSummaryHandler {
    pub fn new(repository: Arc<dyn ConsumptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetConsumptionSummaryQuery,
    ) -> Result<ConsumptionSummary, DomainError> {
        let records = self
            .repository
            .list_recent(&query.user_id, DASHBOARD_HISTORY_LIMIT)
            .await?;
        Ok(ConsumptionSummary::from_records(&records))
    }
}
