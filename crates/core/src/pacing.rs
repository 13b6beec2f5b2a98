//! Client-side request pacing
//!
//! Rakuten throttles applications at roughly one request per second per
//! application id. The pacer keeps a token bucket per service path so the
//! SDK can spend that budget evenly instead of tripping the vendor's 429s.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Pacing budget configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Requests allowed per window.
    pub max_requests: u32,
    /// Window the budget refills over.
    pub window: Duration,
    /// Extra requests allowed in a short burst on a fresh bucket.
    pub burst: u32,
}

impl Default for PacingConfig {
    /// The vendor's documented app quota: one request per second.
    fn default() -> Self {
        Self {
            max_requests: 1,
            window: Duration::from_secs(1),
            burst: 1,
        }
    }
}

impl PacingConfig {
    /// Budget of `max` requests per second.
    #[must_use]
    pub fn per_second(max: u32) -> Self {
        Self {
            max_requests: max,
            window: Duration::from_secs(1),
            burst: max / 2,
        }
    }

    /// Budget of `max` requests per minute.
    #[must_use]
    pub fn per_minute(max: u32) -> Self {
        Self {
            max_requests: max,
            window: Duration::from_secs(60),
            burst: max / 4,
        }
    }

    fn capacity(&self) -> f64 {
        f64::from(self.max_requests + self.burst)
    }

    fn refill_per_sec(&self) -> f64 {
        f64::from(self.max_requests) / self.window.as_secs_f64()
    }
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    refilled_at: Instant,
}

/// Token-bucket pacer keyed by service path.
///
/// Buckets are created lazily and refill continuously. The pacer never
/// sleeps itself; callers combine [`Pacer::try_acquire`] with
/// [`Pacer::time_until_ready`] and decide whether the wait is worth it.
#[derive(Debug)]
pub struct Pacer {
    buckets: Mutex<HashMap<String, Bucket>>,
    config: PacingConfig,
}

impl Pacer {
    /// Create a pacer with the given budget.
    #[must_use]
    pub fn new(config: PacingConfig) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// The configured budget.
    #[must_use]
    pub fn config(&self) -> &PacingConfig {
        &self.config
    }

    /// Spend one token for `key`. Returns false when the budget is empty.
    #[must_use]
    pub fn try_acquire(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut buckets = self.lock();
        let bucket = Self::bucket(&mut buckets, &self.config, key, now);
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Time until one token is available for `key`.
    ///
    /// A zero-rate budget never refills; its wait saturates to
    /// [`Duration::MAX`] instead of overflowing.
    #[must_use]
    pub fn time_until_ready(&self, key: &str) -> Duration {
        let now = Instant::now();
        let mut buckets = self.lock();
        let bucket = Self::bucket(&mut buckets, &self.config, key, now);
        if bucket.tokens >= 1.0 {
            return Duration::ZERO;
        }
        let rate = self.config.refill_per_sec();
        if rate <= 0.0 {
            return Duration::MAX;
        }
        Duration::try_from_secs_f64((1.0 - bucket.tokens) / rate).unwrap_or(Duration::MAX)
    }

    /// Forget the budget state for `key`.
    pub fn reset(&self, key: &str) {
        self.lock().remove(key);
    }

    /// Forget all budget state.
    pub fn reset_all(&self) {
        self.lock().clear();
    }

    fn bucket<'a>(
        buckets: &'a mut HashMap<String, Bucket>,
        config: &PacingConfig,
        key: &str,
        now: Instant,
    ) -> &'a mut Bucket {
        let bucket = buckets.entry(key.to_string()).or_insert_with(|| Bucket {
            tokens: config.capacity(),
            refilled_at: now,
        });

        let elapsed = now.saturating_duration_since(bucket.refilled_at);
        bucket.tokens = (bucket.tokens + elapsed.as_secs_f64() * config.refill_per_sec())
            .min(config.capacity());
        bucket.refilled_at = now;
        bucket
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Bucket>> {
        // A poisoned bucket map is still internally consistent.
        self.buckets.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_bucket_allows_max_plus_burst() {
        let pacer = Pacer::new(PacingConfig {
            max_requests: 2,
            window: Duration::from_secs(60),
            burst: 1,
        });

        assert!(pacer.try_acquire("IchibaItem"));
        assert!(pacer.try_acquire("IchibaItem"));
        assert!(pacer.try_acquire("IchibaItem"));
        assert!(!pacer.try_acquire("IchibaItem"));
    }

    #[test]
    fn budgets_are_independent_per_key() {
        let pacer = Pacer::new(PacingConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
            burst: 0,
        });

        assert!(pacer.try_acquire("IchibaItem"));
        assert!(!pacer.try_acquire("IchibaItem"));
        assert!(pacer.try_acquire("Product"));
    }

    #[test]
    fn empty_bucket_reports_wait_time() {
        let pacer = Pacer::new(PacingConfig {
            max_requests: 1,
            window: Duration::from_secs(2),
            burst: 0,
        });

        assert_eq!(pacer.time_until_ready("k"), Duration::ZERO);
        assert!(pacer.try_acquire("k"));
        let wait = pacer.time_until_ready("k");
        assert!(wait > Duration::ZERO);
        assert!(wait <= Duration::from_secs(2));
    }

    #[test]
    fn reset_restores_the_budget() {
        let pacer = Pacer::new(PacingConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
            burst: 0,
        });

        assert!(pacer.try_acquire("k"));
        assert!(!pacer.try_acquire("k"));
        pacer.reset("k");
        assert!(pacer.try_acquire("k"));
    }

    #[test]
    fn zero_rate_budget_saturates_instead_of_overflowing() {
        let pacer = Pacer::new(PacingConfig {
            max_requests: 0,
            window: Duration::from_secs(1),
            burst: 0,
        });

        assert!(!pacer.try_acquire("k"));
        assert_eq!(pacer.time_until_ready("k"), Duration::MAX);
    }

    #[test]
    fn default_matches_vendor_quota() {
        let config = PacingConfig::default();
        assert_eq!(config.max_requests, 1);
        assert_eq!(config.window, Duration::from_secs(1));
    }
}
