//! Delivery layer: page messaging that always resolves to an outcome.
//!
//! Failures whose platform text matches a known "no receiver" phrasing raise
//! the fallback badge, persist the message as the last error, and arm a single
//! auto-clear timer. A newer fallback resets the timer instead of stacking
//! another one.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use proofreader_config::DeliveryConfig;
use proofreader_protocols::settings::record_last_error;
use proofreader_protocols::{
    DeliveryOutcome, DeliveryReason, FallbackIndicator, PageMessage, PageTransport, ProofreadError,
    SettingsStore, TabId, TransportError,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Badge text shown while the fallback is up.
pub const FALLBACK_BADGE_TEXT: &str = "!";

pub const INVALID_TARGET_ERROR: &str = "No tab id available for delivery.";

/// Case-insensitive substrings that identify a missing receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoReceiverPatterns {
    patterns: Vec<String>,
}

impl NoReceiverPatterns {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn matches(&self, error: &str) -> bool {
        let error = error.to_lowercase();
        self.patterns.iter().any(|p| error.contains(p.as_str()))
    }
}

impl Default for NoReceiverPatterns {
    fn default() -> Self {
        Self::new(DeliveryConfig::default().no_receiver_patterns)
    }
}

#[derive(Debug, Clone)]
pub struct DeliveryPolicy {
    pub patterns: NoReceiverPatterns,
    /// How long the fallback badge stays up without further activity.
    pub badge_clear: Duration,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self::from(&DeliveryConfig::default())
    }
}

impl From<&DeliveryConfig> for DeliveryPolicy {
    fn from(config: &DeliveryConfig) -> Self {
        Self {
            patterns: NoReceiverPatterns::new(&config.no_receiver_patterns),
            badge_clear: Duration::from_millis(config.badge_clear_ms),
        }
    }
}

pub struct Delivery {
    transport: Arc<dyn PageTransport>,
    indicator: Arc<dyn FallbackIndicator>,
    settings: Arc<dyn SettingsStore>,
    policy: DeliveryPolicy,
    clear_timer: Mutex<Option<JoinHandle<()>>>,
}

impl Delivery {
    pub fn new(
        transport: Arc<dyn PageTransport>,
        indicator: Arc<dyn FallbackIndicator>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self::with_policy(transport, indicator, settings, DeliveryPolicy::default())
    }

    pub fn with_policy(
        transport: Arc<dyn PageTransport>,
        indicator: Arc<dyn FallbackIndicator>,
        settings: Arc<dyn SettingsStore>,
        policy: DeliveryPolicy,
    ) -> Self {
        Self {
            transport,
            indicator,
            settings,
            policy,
            clear_timer: Mutex::new(None),
        }
    }

    pub fn policy(&self) -> &DeliveryPolicy {
        &self.policy
    }

    /// Send `message` to `tab`. Never fails; callers branch on the outcome.
    pub async fn deliver(&self, tab: Option<TabId>, message: &PageMessage) -> DeliveryOutcome {
        let Some(tab) = tab else {
            warn!(kind = message.kind(), "delivery without a target tab");
            return DeliveryOutcome::failed(DeliveryReason::InvalidTarget, INVALID_TARGET_ERROR);
        };

        match self.transport.send(tab, message).await {
            Ok(response) => {
                debug!(tab, kind = message.kind(), "message delivered");
                self.clear_fallback();
                DeliveryOutcome::delivered(response)
            }
            Err(TransportError::Runtime(error)) if self.policy.patterns.matches(&error) => {
                info!(tab, kind = message.kind(), %error, "no receiver in tab");
                self.raise_fallback(&error).await;
                DeliveryOutcome::failed(DeliveryReason::NoReceiver, error)
            }
            Err(TransportError::Runtime(error)) => {
                warn!(tab, kind = message.kind(), %error, "send failed");
                DeliveryOutcome::failed(DeliveryReason::SendError, error)
            }
            Err(err @ TransportError::Exception(_)) => {
                warn!(tab, kind = message.kind(), error = %err, "send raised");
                DeliveryOutcome::failed(DeliveryReason::Exception, err.to_string())
            }
        }
    }

    /// Show the badge, persist `message` as the last error, and (re)arm the auto-clear.
    pub async fn raise_fallback(&self, message: &str) {
        self.indicator
            .show(FALLBACK_BADGE_TEXT, &format!("Proofreader: {}", message));
        self.arm_clear_timer();

        if let Err(e) = record_last_error(self.settings.as_ref(), message).await {
            warn!(error = %e, "failed to persist last error");
        }
    }

    fn arm_clear_timer(&self) {
        let indicator = Arc::clone(&self.indicator);
        let delay = self.policy.badge_clear;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            indicator.clear();
        });
        if let Some(previous) = self.clear_timer.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Map a failed outcome to [`ProofreadError::DeliveryUnreachable`]. The
    /// badge goes up for every reason; no-receiver failures already raised it.
    pub async fn unreachable(&self, outcome: DeliveryOutcome) -> ProofreadError {
        let error = outcome
            .error
            .unwrap_or_else(|| outcome.reason.as_str().to_string());
        if outcome.reason != DeliveryReason::NoReceiver {
            self.raise_fallback(&error).await;
        }
        ProofreadError::DeliveryUnreachable(error)
    }

    /// Drop the badge and any pending auto-clear.
    pub fn clear_fallback(&self) {
        if let Some(timer) = self.clear_timer.lock().take() {
            timer.abort();
        }
        self.indicator.clear();
    }
}

impl Drop for Delivery {
    fn drop(&mut self) {
        if let Some(timer) = self.clear_timer.get_mut().take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;
