//! Usability metrics and role lookups over the hosted tables.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{eq, RestClient};
use crate::domain::foundation::{DomainError, MetricId, Timestamp, UserId};
use crate::domain::usability::{MetricAction, UsabilityMetric};
use crate::ports::{MetricsReader, MetricsRecorder, RoleChecker};

const METRICS_TABLE: &str = "metricas_usabilidad";
const ROLES_TABLE: &str = "user_roles";
const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
struct MetricRow {
    id: MetricId,
    user_id: Option<String>,
    formulario: String,
    accion: MetricAction,
    #[serde(default)]
    metadata: Option<Value>,
    timestamp: Timestamp,
}

impl MetricRow {
    fn from_metric(metric: &UsabilityMetric) -> Self {
        Self {
            id: metric.id,
            user_id: metric.user_id.as_ref().map(UserId::to_string),
            formulario: metric.form.clone(),
            accion: metric.action.clone(),
            metadata: metric.metadata.clone(),
            timestamp: metric.timestamp,
        }
    }

    fn into_metric(self) -> Result<UsabilityMetric, DomainError> {
        Ok(UsabilityMetric {
            id: self.id,
            user_id: self.user_id.map(UserId::new).transpose()?,
            form: self.formulario,
            action: self.accion,
            metadata: self.metadata,
            timestamp: self.timestamp,
        })
    }
}

/// Both sides of the metrics table.
#[derive(Debug, Clone)]
pub struct RestMetricsStore {
    client: RestClient,
}

impl RestMetricsStore {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetricsRecorder for RestMetricsStore {
    async fn record(&self, metric: &UsabilityMetric) -> Result<(), DomainError> {
        self.client
            .insert(METRICS_TABLE, &MetricRow::from_metric(metric))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MetricsReader for RestMetricsStore {
    async fn recent(&self, limit: usize) -> Result<Vec<UsabilityMetric>, DomainError> {
        let rows: Vec<MetricRow> = self
            .client
            .select(
                METRICS_TABLE,
                &[
                    ("select", "*".to_string()),
                    ("order", "timestamp.desc".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        rows.into_iter().map(MetricRow::into_metric).collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self
            .client
            .count(METRICS_TABLE, &[("select", "*".to_string())])
            .await?)
    }
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    #[allow(dead_code)]
    role: String,
}

/// Admin lookup against `user_roles`.
#[derive(Debug, Clone)]
pub struct RestRoleChecker {
    client: RestClient,
}

impl RestRoleChecker {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleChecker for RestRoleChecker {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let rows: Vec<RoleRow> = self
            .client
            .select(
                ROLES_TABLE,
                &[
                    ("user_id", eq(user_id)),
                    ("role", eq(ADMIN_ROLE)),
                    ("select", "role".to_string()),
                ],
            )
            .await?;
        Ok(!rows.is_empty())
    }
}
