//! Account repository over the hosted `profiles` table.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::{eq, RestClient};
use crate::domain::accessibility::AccessibilityProfile;
use crate::domain::account::{Account, DisplayName};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::AccountRepository;

const PROFILES_TABLE: &str = "profiles";

#[derive(Debug, Serialize, Deserialize)]
struct AccountRow {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    nombre: Option<String>,
    /// Written only by the profile service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    perfil_accesibilidad: Option<AccessibilityProfile>,
    #[serde(default)]
    updated_at: Option<Timestamp>,
}

impl AccountRow {
    fn from_account(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: Some(account.email.clone()),
            nombre: account.display_name.as_ref().map(|n| n.as_str().to_string()),
            perfil_accesibilidad: None,
            updated_at: Some(account.updated_at),
        }
    }

    fn into_account(self) -> Result<Account, DomainError> {
        Ok(Account {
            id: UserId::new(self.id)?,
            email: self.email.unwrap_or_default(),
            // Names stored before validation existed may be too short; hide them.
            display_name: self.nombre.and_then(|n| DisplayName::new(&n).ok()),
            accessibility_profile: self.perfil_accesibilidad.unwrap_or_default(),
            updated_at: self.updated_at.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RestAccountRepository {
    client: RestClient,
}

impl RestAccountRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountRepository for RestAccountRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<Account>, DomainError> {
        let rows: Vec<AccountRow> = self
            .client
            .select(
                PROFILES_TABLE,
                &[("id", eq(user_id)), ("select", "*".to_string())],
            )
            .await?;
        rows.into_iter().next().map(AccountRow::into_account).transpose()
    }

    async fn upsert(&self, account: &Account) -> Result<(), DomainError> {
        self.client
            .upsert(PROFILES_TABLE, &AccountRow::from_account(account))
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self
            .client
            .count(PROFILES_TABLE, &[("select", "*".to_string())])
            .await?)
    }
}
