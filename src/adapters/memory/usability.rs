//! In-memory usability metrics store and role table.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::usability::UsabilityMetric;
use crate::ports::{MetricsReader, MetricsRecorder, RoleChecker};

/// Metrics table backed by a vector. Implements both read and write sides.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetricsStore {
    metrics: Arc<RwLock<Vec<UsabilityMetric>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryMetricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn all(&self) -> Vec<UsabilityMetric> {
        self.metrics.read().await.clone()
    }
}

#[async_trait]
impl MetricsRecorder for InMemoryMetricsStore {
    async fn record(&self, metric: &UsabilityMetric) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::backend("simulated metrics failure"));
        }
        self.metrics.write().await.push(metric.clone());
        Ok(())
    }
}

#[async_trait]
impl MetricsReader for InMemoryMetricsStore {
    async fn recent(&self, limit: usize) -> Result<Vec<UsabilityMetric>, DomainError> {
        let mut metrics = self.metrics.read().await.clone();
        metrics.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        metrics.truncate(limit);
        Ok(metrics)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.metrics.read().await.len() as u64)
    }
}

/// Role table holding the set of administrator ids.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleChecker {
    admins: Arc<RwLock<HashSet<UserId>>>,
}

impl InMemoryRoleChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn grant_admin(&self, user_id: UserId) {
        self.admins.write().await.insert(user_id);
    }
}

#[async_trait]
impl RoleChecker for InMemoryRoleChecker {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.admins.read().await.contains(user_id))
    }
}
