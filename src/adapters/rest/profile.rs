//! Remote profile service over the hosted `profiles` table.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::{eq, RestClient};
use crate::domain::accessibility::AccessibilityProfile;
use crate::domain::foundation::UserId;
use crate::ports::{RemoteProfileError, RemoteProfileService};

const PROFILES_TABLE: &str = "profiles";
const PROFILE_COLUMN: &str = "perfil_accesibilidad";

#[derive(Debug, Deserialize)]
struct ProfileRow {
    perfil_accesibilidad: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProfilePatch {
    perfil_accesibilidad: AccessibilityProfile,
}

/// Reads and patches the `perfil_accesibilidad` column keyed by user id.
#[derive(Debug, Clone)]
pub struct RestProfileService {
    client: RestClient,
}

impl RestProfileService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteProfileService for RestProfileService {
    async fn fetch(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccessibilityProfile>, RemoteProfileError> {
        let rows: Vec<ProfileRow> = self
            .client
            .select(
                PROFILES_TABLE,
                &[
                    ("id", eq(user_id)),
                    ("select", PROFILE_COLUMN.to_string()),
                ],
            )
            .await?;

        // A missing row and a null column both mean "no stored profile".
        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.perfil_accesibilidad)
            .map(|value| AccessibilityProfile::from_stored(&value)))
    }

    async fn update(
        &self,
        user_id: &UserId,
        profile: AccessibilityProfile,
    ) -> Result<(), RemoteProfileError> {
        self.client
            .patch(
                PROFILES_TABLE,
                &[("id", eq(user_id))],
                &ProfilePatch {
                    perfil_accesibilidad: profile,
                },
            )
            .await?;
        Ok(())
    }
}
