//! In-memory settings store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use proofreader_protocols::error::StorageError;
use proofreader_protocols::settings::{SettingsMap, SettingsStore};

use super::{merge_values, select_keys};

/// In-memory settings store.
pub struct MemorySettingsStore {
    values: RwLock<SettingsMap>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(SettingsMap::new()),
        }
    }

    /// Create a store pre-populated with values.
    pub fn with_values(values: SettingsMap) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, keys: &[&str]) -> Result<SettingsMap, StorageError> {
        let values = self.values.read().await;
        Ok(select_keys(&values, keys))
    }

    async fn set(&self, values: SettingsMap) -> Result<(), StorageError> {
        merge_values(&mut *self.values.write().await, values);
        Ok(())
    }
}
