//! In-memory Remote Profile Service.
//!
//! Stands in for the hosted profile table in tests and offline runs.
//!
//! # Features
//!
//! - Pre-seeded profiles per user
//! - Error injection for fetch and update
//! - Fetch gating, to hold a reconciliation in `Fetching`
//! - Call tracking for verification
//!
//! ```ignore
//! let remote = InMemoryRemoteProfileService::new()
//!     .with_profile(user.clone(), AccessibilityProfile::Motor);
//! remote.pause_fetches();
//! // ... sign in, observe Fetching ...
//! remote.release_fetches(1);
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{RwLock, Semaphore};

use crate::domain::accessibility::AccessibilityProfile;
use crate::domain::foundation::UserId;
use crate::ports::{RemoteProfileError, RemoteProfileService};

/// In-memory profile service
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemoteProfileService {
    profiles: Arc<RwLock<HashMap<UserId, AccessibilityProfile>>>,
    fail_fetch: Arc<AtomicBool>,
    fail_update: Arc<AtomicBool>,
    gate: Arc<Mutex<Option<Arc<Semaphore>>>>,
    fetch_calls: Arc<Mutex<Vec<UserId>>>,
    update_calls: Arc<Mutex<Vec<(UserId, AccessibilityProfile)>>>,
}

impl InMemoryRemoteProfileService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored profile.
    pub fn with_profile(self, user_id: UserId, profile: AccessibilityProfile) -> Self {
        if let Ok(mut profiles) = self.profiles.try_write() {
            profiles.insert(user_id, profile);
        }
        self
    }

    /// Replace a stored profile (as another device would).
    pub async fn set_profile(&self, user_id: UserId, profile: AccessibilityProfile) {
        self.profiles.write().await.insert(user_id, profile);
    }

    pub async fn stored_profile(&self, user_id: &UserId) -> Option<AccessibilityProfile> {
        self.profiles.read().await.get(user_id).copied()
    }

    /// Make every fetch fail until reset.
    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Make every update fail until reset.
    pub fn set_fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    /// Hold every subsequent fetch until released.
    pub fn pause_fetches(&self) {
        *self.lock_gate() = Some(Arc::new(Semaphore::new(0)));
    }

    /// Let `n` held fetches proceed.
    pub fn release_fetches(&self, n: usize) {
        if let Some(gate) = self.lock_gate().as_ref() {
            gate.add_permits(n);
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    pub fn fetched_users(&self) -> Vec<UserId> {
        self.fetch_calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn updates(&self) -> Vec<(UserId, AccessibilityProfile)> {
        self.update_calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn lock_gate(&self) -> std::sync::MutexGuard<'_, Option<Arc<Semaphore>>> {
        self.gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RemoteProfileService for InMemoryRemoteProfileService {
    async fn fetch(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AccessibilityProfile>, RemoteProfileError> {
        if let Ok(mut calls) = self.fetch_calls.lock() {
            calls.push(user_id.clone());
        }

        let gate = self.lock_gate().clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(RemoteProfileError::network("simulated fetch failure"));
        }
        Ok(self.profiles.read().await.get(user_id).copied())
    }

    async fn update(
        &self,
        user_id: &UserId,
        profile: AccessibilityProfile,
    ) -> Result<(), RemoteProfileError> {
        if let Ok(mut calls) = self.update_calls.lock() {
            calls.push((user_id.clone(), profile));
        }

        if self.fail_update.load(Ordering::SeqCst) {
            return Err(RemoteProfileError::network("simulated update failure"));
        }
        self.profiles.write().await.insert(user_id.clone(), profile);
        Ok(())
    }
}
