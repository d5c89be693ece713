//! Rate-limit retry policy.

use std::time::Duration;

/// Linear backoff for HTTP 429 responses.
///
/// Retry `n` (1-based) waits `n * backoff`. Only rate limiting is retried;
/// every other failure propagates on the first attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first.
    pub max_retries: u32,
    /// Backoff unit.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }

    /// Every delay the policy will wait, in order.
    pub fn schedule(&self) -> Vec<Duration> {
        (1..=self.max_retries).map(|attempt| self.delay_for_attempt(attempt)).collect()
    }
}
