//! AccountRepository port for the user's account record

use async_trait::async_trait;

use crate::domain::account::Account;
use crate::domain::foundation::{DomainError, UserId};

/// Repository for account records
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find the account for a user
    async fn find(&self, user_id: &UserId) -> Result<Option<Account>, DomainError>;

    /// Insert or replace the account
    async fn upsert(&self, account: &Account) -> Result<(), DomainError>;

    /// Number of registered accounts
    async fn count(&self) -> Result<u64, DomainError>;
}
