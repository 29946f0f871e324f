//! In-Memory Preference Store Adapter
//!
//! Keeps preferences in memory. Useful for testing and for sessions where the
//! device offers no persistent storage. Can be switched to an unavailable mode
//! that fails every call, the way a sandboxed browser storage does.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{PreferenceKey, PreferenceStore, PreferenceStoreError};

/// In-memory storage for device preferences
#[derive(Debug, Clone)]
pub struct InMemoryPreferenceStore {
    values: Arc<RwLock<HashMap<PreferenceKey, String>>>,
    available: Arc<AtomicBool>,
}

impl InMemoryPreferenceStore {
    /// Create an empty, available store
    pub fn new() -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Create a store that rejects every operation
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    /// Create a store pre-populated with `entries`
    pub fn with_entries(entries: impl IntoIterator<Item = (PreferenceKey, String)>) -> Self {
        Self {
            values: Arc::new(RwLock::new(entries.into_iter().collect())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Toggle availability (simulates storage being disabled at runtime)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Raw stored value, bypassing availability (for assertions)
    pub async fn peek(&self, key: PreferenceKey) -> Option<String> {
        self.values.read().await.get(&key).cloned()
    }

    fn check_available(&self) -> Result<(), PreferenceStoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(PreferenceStoreError::Unavailable)
        }
    }
}

impl Default for InMemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn read(&self, key: PreferenceKey) -> Result<Option<String>, PreferenceStoreError> {
        self.check_available()?;
        Ok(self.values.read().await.get(&key).cloned())
    }

    async fn write(&self, key: PreferenceKey, value: &str) -> Result<(), PreferenceStoreError> {
        self.check_available()?;
        self.values.write().await.insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: PreferenceKey) -> Result<(), PreferenceStoreError> {
        self.check_available()?;
        self.values.write().await.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_of_missing_key_is_absent() {
        let store = InMemoryPreferenceStore::new();
        assert_eq!(store.read(PreferenceKey::Theme).await.unwrap(), None);
    }

    #[tokio::test]
    async fn write_then_read_returns_value() {
        let store = InMemoryPreferenceStore::new();
        store.write(PreferenceKey::Theme, "dark").await.unwrap();
        assert_eq!(
            store.read(PreferenceKey::Theme).await.unwrap(),
            Some("dark".to_string())
        );
    }

    #[tokio::test]
    async fn remove_clears_value_and_tolerates_missing_keys() {
        let store = InMemoryPreferenceStore::with_entries([(PreferenceKey::Language, "en".to_string())]);
        store.remove(PreferenceKey::Language).await.unwrap();
        store.remove(PreferenceKey::Language).await.unwrap();
        assert_eq!(store.read(PreferenceKey::Language).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = InMemoryPreferenceStore::unavailable();
        assert!(matches!(
            store.read(PreferenceKey::Theme).await,
            Err(PreferenceStoreError::Unavailable)
        ));
        assert!(store.write(PreferenceKey::Theme, "dark").await.is_err());
        assert!(store.remove(PreferenceKey::Theme).await.is_err());
        assert_eq!(store.peek(PreferenceKey::Theme).await, None);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryPreferenceStore::new();
        let clone = store.clone();
        clone.write(PreferenceKey::Theme, "light").await.unwrap();
        assert_eq!(store.peek(PreferenceKey::Theme).await, Some("light".to_string()));
    }
}
