//! GetAdminOverviewHandler - Query handler for the administrator panel.

use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::usability::{AdminOverview, RECENT_METRICS_LIMIT};
use crate::ports::{AccountRepository, ConsumptionRepository, MetricsReader, RoleChecker};

/// Query for the admin overview.
#[derive(Debug, Clone)]
pub struct GetAdminOverviewQuery {
    pub user_id: UserId,
}

/// Handler for the admin overview.
pub struct GetAdminOverviewHandler {
    roles: Arc<dyn RoleChecker>,
    accounts: Arc<dyn AccountRepository>,
    metrics: Arc<dyn MetricsReader>,
    consumption: Arc<dyn ConsumptionRepository>,
}

impl GetAdminOverviewHandler {
    pub fn new(
        roles: Arc<dyn RoleChecker>,
        accounts: Arc<dyn AccountRepository>,
        metrics: Arc<dyn MetricsReader>,
        consumption: Arc<dyn ConsumptionRepository>,
    ) -> Self {
        Self {
            roles,
            accounts,
            metrics,
            consumption,
        }
    }

    pub async fn handle(&self, query: GetAdminOverviewQuery) -> Result<AdminOverview, DomainError> {
        // A failed role lookup counts as "not admin".
        let is_admin = match self.roles.is_admin(&query.user_id).await {
            Ok(is_admin) => is_admin,
            Err(e) => {
                warn!(user_id = %query.user_id.short(), error = %e, "Role lookup failed");
                false
            }
        };
        if !is_admin {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Administrator role required",
            ));
        }

        let total_users = self.accounts.count().await?;
        let total_metrics = self.metrics.count().await?;
        let total_consumption_kwh = self.consumption.total_kwh_all_users().await?;
        let recent = self.metrics.recent(RECENT_METRICS_LIMIT).await?;

        Ok(AdminOverview::new(
            total_users,
            total_metrics,
            total_consumption_kwh,
            recent,
        ))
    }
}
