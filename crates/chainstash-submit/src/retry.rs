//! Retry configuration and exponential backoff computation

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for retry behavior. Every field can be overridden
/// independently from the defaults via struct update syntax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Backoff before the first retry attempt (default: 1 second).
    pub initial_delay: Duration,
    /// Ceiling on any single backoff (default: 30 seconds).
    pub max_delay: Duration,
    /// Multiplier for exponential backoff (default: 2.0).
    pub backoff_multiplier: f64,
    /// Maximum number of retry attempts (default: 3).
    pub max_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            max_retries: 3,
        }
    }
}

impl RetryConfig {
    /// Backoff before retry attempt `attempt` (1-based).
    ///
    /// Computes `initial_delay * backoff_multiplier^(attempt-1)`, capped at
    /// `max_delay`. The whole-write driver skips the delay only before its
    /// initial submission; every retry attempt waits.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let base_ms = self.initial_delay.as_millis() as f64;
        let max_ms = self.max_delay.as_millis() as f64;
        let computed = base_ms * self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        Duration::from_millis(computed.min(max_ms) as u64)
    }
}
