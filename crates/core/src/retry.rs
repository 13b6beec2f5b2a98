//! Backoff policy for transient request failures
//!
//! The client retries connect errors, timeouts and throttling responses.
//! This module only computes the schedule; the async sleep-and-retry loop
//! lives next to the HTTP call.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry schedule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Cap applied to the exponential schedule.
    pub max_delay: Duration,
    /// Multiplier between consecutive delays.
    pub backoff_multiplier: f64,
    /// Spread delays by up to 25% to avoid synchronized retries.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Schedule for callers that would rather fail fast.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    /// Schedule tolerant of longer vendor hiccups.
    #[must_use]
    pub fn patient() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(15),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// Delay to sleep before the given attempt (0-based).
    ///
    /// Attempt 0 is the initial request and never waits.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exp = self.initial_delay.as_secs_f64()
            * self.backoff_multiplier.powi(attempt as i32 - 1);
        let capped = exp.min(self.max_delay.as_secs_f64());

        let secs = if self.jitter {
            capped * (1.0 + jitter_fraction() * 0.25)
        } else {
            capped
        };

        Duration::from_secs_f64(secs)
    }
}

/// Cheap pseudo-random fraction in `[0, 1)`, good enough to spread delays.
fn jitter_fraction() -> f64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos() as u64,
    );
    (hasher.finish() % 1024) as f64 / 1024.0
}
