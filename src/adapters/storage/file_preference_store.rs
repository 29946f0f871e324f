//! File-based Preference Store Adapter
//!
//! Stores all preferences as one flat JSON object on disk, keyed by the
//! storage key names. Writes go to a sibling temp file first and are renamed
//! into place so a crash never leaves a half-written file behind.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::warn;

use crate::ports::{PreferenceKey, PreferenceStore, PreferenceStoreError};

/// File-based storage for device preferences
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Create a store backed by the JSON file at `path`
    ///
    /// The file and its parent directories are created on first write.
    ///
    /// ```ignore
    /// let store = FilePreferenceStore::new("./data/preferences.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, PreferenceStoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let json = fs::read_to_string(&self.path)
            .await
            .map_err(|e| PreferenceStoreError::IoError(e.to_string()))?;

        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&json).map_err(|e| PreferenceStoreError::Corrupt(e.to_string()))
    }

    /// Values for a read-modify-write. A corrupt file is discarded so the next
    /// save replaces it; the flag reports that it was.
    async fn load_for_update(
        &self,
    ) -> Result<(BTreeMap<String, String>, bool), PreferenceStoreError> {
        match self.load().await {
            Ok(values) => Ok((values, false)),
            Err(PreferenceStoreError::Corrupt(reason)) => {
                warn!(path = %self.path.display(), error = %reason, "Corrupt preference file, starting over");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| PreferenceStoreError::IoError(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(values)
            .map_err(|e| PreferenceStoreError::IoError(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(|e| PreferenceStoreError::IoError(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| PreferenceStoreError::IoError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn read(&self, key: PreferenceKey) -> Result<Option<String>, PreferenceStoreError> {
        let _guard = self.lock.lock().await;
        let values = self.load().await?;
        Ok(values.get(key.as_str()).cloned())
    }

    async fn write(&self, key: PreferenceKey, value: &str) -> Result<(), PreferenceStoreError> {
        let _guard = self.lock.lock().await;
        let (mut values, _) = self.load_for_update().await?;
        values.insert(key.as_str().to_string(), value.to_string());
        self.save(&values).await
    }

    async fn remove(&self, key: PreferenceKey) -> Result<(), PreferenceStoreError> {
        let _guard = self.lock.lock().await;
        let (mut values, repaired) = self.load_for_update().await?;
        if values.remove(key.as_str()).is_some() || repaired {
            self.save(&values).await?;
        }
        Ok(())
    }
}
