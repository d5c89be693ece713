//! JSON-file settings store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use proofreader_protocols::error::StorageError;
use proofreader_protocols::settings::{SettingsMap, SettingsStore};

use super::{merge_values, select_keys};

/// Settings persisted as one pretty-printed JSON object.
///
/// A missing file reads as empty; the file and its directory are created on
/// first write. Writes go to a sibling temp file that is renamed over the
/// target, so readers never observe a truncated file.
pub struct FileSettingsStore {
    path: PathBuf,
    // Reads share; read-modify-write cycles are exclusive within this process.
    lock: RwLock<()>,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<SettingsMap, StorageError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(SettingsMap::new());
        }
        let json = tokio::fs::read_to_string(&self.path).await?;
        if json.trim().is_empty() {
            return Ok(SettingsMap::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "settings.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get(&self, keys: &[&str]) -> Result<SettingsMap, StorageError> {
        let _guard = self.lock.read().await;
        let all = self.read_all().await?;
        Ok(select_keys(&all, keys))
    }

    async fn set(&self, values: SettingsMap) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;

        let mut all = self.read_all().await?;
        merge_values(&mut all, values);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&all)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use proofreader_protocols::settings::{keys, load_settings, record_last_error, save_api_key, save_tone};
    use proofreader_protocols::types::Tone;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.json"));
        let values = store.get(&keys::ALL).await.unwrap();
        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let store = FileSettingsStore::new(&path);

        save_tone(&store, Tone::Friendly).await.unwrap();
        assert!(path.exists());

        let reopened = FileSettingsStore::new(&path);
        let settings = load_settings(&reopened).await.unwrap();
        assert_eq!(settings.tone, Tone::Friendly);
    }

    #[tokio::test]
    async fn test_writes_merge_with_existing_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.json"));

        save_tone(&store, Tone::Formal).await.unwrap();
        record_last_error(&store, "boom").await.unwrap();

        let settings = load_settings(&store).await.unwrap();
        assert_eq!(settings.tone, Tone::Formal);
        assert_eq!(settings.last_error.unwrap().message, "boom");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileSettingsStore::new(&path);
        let err = store.get(&keys::ALL).await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileSettingsStore::new(&path);

        save_tone(&store, Tone::Formal).await.unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("settings.json.tmp").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_see_saved_key_during_concurrent_writes() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FileSettingsStore::new(dir.path().join("settings.json")));
        save_api_key(store.as_ref(), "sk-concurrent").await.unwrap();

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 0..300 {
                    record_last_error(store.as_ref(), &format!("failure {}", i))
                        .await
                        .unwrap();
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..3 {
            let store = store.clone();
            readers.push(tokio::spawn(async move {
                let mut missing = 0;
                for _ in 0..300 {
                    let settings = load_settings(store.as_ref()).await.unwrap();
                    if settings.api_key() != Some("sk-concurrent") {
                        missing += 1;
                    }
                }
                missing
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            assert_eq!(reader.await.unwrap(), 0);
        }
        let settings = load_settings(store.as_ref()).await.unwrap();
        assert_eq!(settings.last_error.unwrap().message, "failure 299");
    }
}
