//! Persisted settings: key names, the store seam, and typed accessors.
//!
//! Settings are never cached by the pipeline. Every operation re-reads them
//! through [`load_settings`] because the user may change them between runs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::error::StorageError;
use crate::types::Tone;

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

/// Persisted key names.
pub mod keys {
    pub const API_KEY: &str = "openai_api_key";
    pub const TONE: &str = "tone_preference";
    pub const DEBUG_ENABLED: &str = "debug_enabled";
    pub const LAST_ERROR_MESSAGE: &str = "last_error_message";
    pub const LAST_ERROR_AT: &str = "last_error_at";

    pub const ALL: [&str; 5] = [API_KEY, TONE, DEBUG_ENABLED, LAST_ERROR_MESSAGE, LAST_ERROR_AT];
}

/// Raw key/value view of the store.
pub type SettingsMap = HashMap<String, Value>;

/// Key/value settings storage.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the given keys. Missing keys are simply absent from the result.
    async fn get(&self, keys: &[&str]) -> Result<SettingsMap, StorageError>;

    /// Write the given values, leaving other keys untouched. `Value::Null` removes a key.
    async fn set(&self, values: SettingsMap) -> Result<(), StorageError>;
}

/// Most recent failure, kept for the debug console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub message: String,
    pub at: Option<DateTime<Utc>>,
}

/// Typed view over the persisted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub tone: Tone,
    pub debug_enabled: bool,
    pub last_error: Option<LastError>,
}

impl Settings {
    /// Build settings from raw values, applying defaults for anything missing or malformed.
    pub fn from_map(map: &SettingsMap) -> Self {
        let api_key = map
            .get(keys::API_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        let tone = map
            .get(keys::TONE)
            .and_then(Value::as_str)
            .map(Tone::parse_lenient)
            .unwrap_or_default();

        let debug_enabled = map
            .get(keys::DEBUG_ENABLED)
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let last_error = map
            .get(keys::LAST_ERROR_MESSAGE)
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(|message| LastError {
                message: message.to_string(),
                at: map
                    .get(keys::LAST_ERROR_AT)
                    .and_then(Value::as_i64)
                    .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            });

        Self {
            api_key,
            tone,
            debug_enabled,
            last_error,
        }
    }

    /// The API key, if one is stored.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

/// Read every setting.
pub async fn load_settings(store: &dyn SettingsStore) -> Result<Settings, StorageError> {
    let map = store.get(&keys::ALL).await?;
    Ok(Settings::from_map(&map))
}

/// Store a failure message with the current time.
pub async fn record_last_error(store: &dyn SettingsStore, message: &str) -> Result<(), StorageError> {
    let mut values = SettingsMap::new();
    values.insert(keys::LAST_ERROR_MESSAGE.to_string(), Value::from(message));
    values.insert(
        keys::LAST_ERROR_AT.to_string(),
        Value::from(Utc::now().timestamp_millis()),
    );
    store.set(values).await
}

/// Remove the recorded failure.
pub async fn clear_last_error(store: &dyn SettingsStore) -> Result<(), StorageError> {
    let mut values = SettingsMap::new();
    values.insert(keys::LAST_ERROR_MESSAGE.to_string(), Value::Null);
    values.insert(keys::LAST_ERROR_AT.to_string(), Value::Null);
    store.set(values).await
}

/// Store a trimmed API key. Blank keys are rejected.
pub async fn save_api_key(store: &dyn SettingsStore, api_key: &str) -> Result<(), StorageError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(StorageError::InvalidValue {
            key: keys::API_KEY.to_string(),
            message: "Please enter a valid API Key.".to_string(),
        });
    }
    store
        .set(HashMap::from([(keys::API_KEY.to_string(), Value::from(api_key))]))
        .await
}

pub async fn save_tone(store: &dyn SettingsStore, tone: Tone) -> Result<(), StorageError> {
    store
        .set(HashMap::from([(keys::TONE.to_string(), Value::from(tone.as_str()))]))
        .await
}

pub async fn save_debug_enabled(store: &dyn SettingsStore, enabled: bool) -> Result<(), StorageError> {
    store
        .set(HashMap::from([(keys::DEBUG_ENABLED.to_string(), Value::from(enabled))]))
        .await
}
