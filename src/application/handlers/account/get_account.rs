//! GetAccountHandler - Query handler for the account page.

use serde_json::json;
use std::sync::Arc;

use crate::application::handlers::usability::UsabilityTracker;
use crate::domain::account::Account;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::usability::MetricAction;
use crate::ports::AccountRepository;

#[derive(Debug, Clone)]
pub struct GetAccountQuery {
    pub user_id: UserId,
}

pub struct GetAccountHandler {
    accounts: Arc<dyn AccountRepository>,
    tracker: UsabilityTracker,
}

impl GetAccountHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, tracker: UsabilityTracker) -> Self {
        Self { accounts, tracker }
    }

    /// The account, or `None` if the row has not been created yet.
    pub async fn handle(&self, query: GetAccountQuery) -> Result<Option<Account>, DomainError> {
        self.tracker
            .track(
                Some(&query.user_id),
                MetricAction::ProfileView,
                Some(json!({
                    "timestamp": Timestamp::now().to_rfc3339(),
                    "user": query.user_id.as_str(),
                })),
            )
            .await;

        self.accounts.find(&query.user_id).await
    }
}
