//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub openai: OpenAIConfig,

    #[serde(default)]
    pub delivery: DeliveryConfig,

    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Reject values that would disable the pipeline's safety limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openai.timeout_ms == 0 {
            return Err(invalid("openai.timeout_ms", "must be greater than zero"));
        }
        if self.openai.max_tokens == 0 {
            return Err(invalid("openai.max_tokens", "must be greater than zero"));
        }
        if self.openai.api_url.trim().is_empty() {
            return Err(invalid("openai.api_url", "must not be empty"));
        }
        if self.page.max_frame_depth == 0 {
            return Err(invalid("page.max_frame_depth", "must be at least 1"));
        }
        if self.delivery.no_receiver_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid("delivery.no_receiver_patterns", "patterns must not be blank"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Chat-completions client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Additional attempts after an HTTP 429.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff unit; attempt `n` waits `n * backoff_ms`.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_max_retries() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    1_000
}

/// Delivery layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    #[serde(default = "default_badge_clear_ms")]
    pub badge_clear_ms: u64,

    /// Platform error fragments meaning "nobody is listening", matched case-insensitively.
    #[serde(default = "default_no_receiver_patterns")]
    pub no_receiver_patterns: Vec<String>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            badge_clear_ms: default_badge_clear_ms(),
            no_receiver_patterns: default_no_receiver_patterns(),
        }
    }
}

fn default_badge_clear_ms() -> u64 {
    8_000
}

fn default_no_receiver_patterns() -> Vec<String> {
    vec![
        "receiving end does not exist".to_string(),
        "could not establish connection".to_string(),
        "no tab with id".to_string(),
    ]
}

/// Page-side configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_max_frame_depth")]
    pub max_frame_depth: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            max_frame_depth: default_max_frame_depth(),
        }
    }
}

fn default_max_frame_depth() -> usize {
    4
}

/// Settings storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> String {
    "~/.proofreader/settings.json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let config = Config::default();
        assert_eq!(config.openai.timeout_ms, 15_000);
        assert_eq!(config.openai.max_tokens, 500);
        assert_eq!(config.openai.max_retries, 2);
        assert_eq!(config.openai.backoff_ms, 1_000);
        assert_eq!(config.delivery.badge_clear_ms, 8_000);
        assert_eq!(config.page.max_frame_depth, 4);
        assert_eq!(config.delivery.no_receiver_patterns.len(), 3);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.openai.timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("openai.timeout_ms"));
    }

    #[test]
    fn test_blank_pattern_rejected() {
        let mut config = Config::default();
        config.delivery.no_receiver_patterns.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_frame_depth_rejected() {
        let mut config = Config::default();
        config.page.max_frame_depth = 0;
        assert!(config.validate().is_err());
    }
}
