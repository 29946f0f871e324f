//! UpdateDisplayNameHandler - Command handler for renaming an account.

use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::application::handlers::usability::UsabilityTracker;
use crate::domain::account::{Account, DisplayName};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::usability::MetricAction;
use crate::ports::AccountRepository;

/// Command to change the display name.
#[derive(Debug, Clone)]
pub struct UpdateDisplayNameCommand {
    pub user_id: UserId,
    /// Used only when the account row does not exist yet.
    pub email: String,
    pub display_name: String,
}

/// Result of a display name update.
#[derive(Debug, Clone)]
pub struct UpdateDisplayNameResult {
    pub account: Account,
    /// False when the name was already stored and nothing was written.
    pub changed: bool,
}

/// Handler for display name updates.
pub struct UpdateDisplayNameHandler {
    accounts: Arc<dyn AccountRepository>,
    tracker: UsabilityTracker,
}

impl UpdateDisplayNameHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, tracker: UsabilityTracker) -> Self {
        Self { accounts, tracker }
    }

    pub async fn handle(
        &self,
        cmd: UpdateDisplayNameCommand,
    ) -> Result<UpdateDisplayNameResult, DomainError> {
        self.tracker
            .track_click(Some(&cmd.user_id), "profile_save")
            .await;

        // 1. Validate
        let name = DisplayName::new(&cmd.display_name)?;

        // 2. Load, or start a fresh row
        let mut account = self
            .accounts
            .find(&cmd.user_id)
            .await?
            .unwrap_or_else(|| Account::new(cmd.user_id.clone(), cmd.email));

        // 3. Skip unchanged names
        if !account.is_renamed_to(&name) {
            debug!(user_id = %cmd.user_id.short(), "Display name unchanged, nothing written");
            return Ok(UpdateDisplayNameResult {
                account,
                changed: false,
            });
        }

        // 4. Persist and time the write
        let started = Instant::now();
        account.rename(name);
        self.accounts.upsert(&account).await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        self.tracker
            .track(
                Some(&cmd.user_id),
                MetricAction::ProfileUpdate,
                Some(json!({ "ms": elapsed_ms })),
            )
            .await;

        Ok(UpdateDisplayNameResult {
            account,
            changed: true,
        })
    }
}
