//! In-memory account repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::Account;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::AccountRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<UserId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of upserts is not tracked; inspect the stored row instead.
    pub async fn get(&self, user_id: &UserId) -> Option<Account> {
        self.accounts.read().await.get(user_id).cloned()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, account: &Account) -> Result<(), DomainError> {
        self.accounts
            .write()
            .await
            .insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.accounts.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_replaces_existing_row() {
        let repo = InMemoryAccountRepository::new();
        let id = UserId::new("u1").unwrap();
        let mut account = Account::new(id.clone(), "a@example.com");
        repo.upsert(&account).await.unwrap();

        account.email = "b@example.com".to_string();
        repo.upsert(&account).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.find(&id).await.unwrap().unwrap().email, "b@example.com");
    }
}
