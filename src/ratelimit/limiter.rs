//! Core rate limiter implementation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use super::decision::RateLimit;
use super::log::AttemptLog;
use crate::cache::Cache;
use crate::clock::{Clock, SystemClock};
use crate::config::RateLimiterConfig;
use crate::error::Result;

/// A sliding-window rate limiter over a shared cache.
///
/// Each limiter is bound at construction to a window length and a quota;
/// [`consume`](Self::consume) decides, per caller-supplied key, whether one
/// more unit of work may proceed. All state lives in the cache, so any
/// number of limiter instances pointed at the same cache and name act as
/// one logical limiter.
///
/// Accounting is best-effort, not exact: each call performs an untransacted
/// read-modify-write against the cache, so concurrent callers for the same
/// key can overwrite each other's append and the window may admit slightly
/// more than `limit` under contention. A backend with server-side atomicity
/// can tighten this behind the [`Cache`] trait without changing this
/// contract.
pub struct RateLimiter {
    /// Shared cache holding per-key attempt logs
    cache: Arc<dyn Cache>,
    /// Time source, swappable for tests
    clock: Arc<dyn Clock>,
    /// Discriminator namespacing this limiter's storage keys
    name: String,
    /// Sliding window length in seconds
    window_secs: u64,
    /// Max accepted consumptions per window per key
    limit: u64,
}

impl RateLimiter {
    /// Create a rate limiter using the system clock.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(cache: Arc<dyn Cache>, config: RateLimiterConfig) -> Result<Self> {
        Self::with_clock(cache, config, Arc::new(SystemClock))
    }

    /// Create a rate limiter with an explicit time source.
    pub fn with_clock(
        cache: Arc<dyn Cache>,
        config: RateLimiterConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cache,
            clock,
            name: config.name,
            window_secs: config.window_secs,
            limit: config.limit,
        })
    }

    /// The configured discriminator.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured window length in seconds.
    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }

    /// The configured quota per window.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Consume one unit of quota for `key`.
    ///
    /// Reads the key's attempt history, drops entries that have slid out of
    /// the window, decides against the quota, records this attempt, and
    /// writes the history back with a TTL of one window. The attempt is
    /// recorded whether or not it is accepted: the window tracks attempts,
    /// so a client hammering a saturated key keeps pushing its retry time
    /// out.
    ///
    /// One cache read and one cache write per call; cache failures
    /// propagate unmodified.
    pub async fn consume(&self, key: &str) -> Result<RateLimit> {
        let now = self.clock.now();
        let storage_key = self.storage_key(key);

        trace!(key = %storage_key, "Checking rate limit");

        let mut log = match self.cache.get(&storage_key).await? {
            Some(bytes) => AttemptLog::decode(&bytes),
            None => AttemptLog::new(),
        };

        log.prune(now - self.window_secs as f64);

        let count = log.len();
        let accepted = count < self.limit;

        log.push(now);

        self.cache
            .set(
                &storage_key,
                log.encode()?,
                Duration::from_secs(self.window_secs),
            )
            .await?;

        // The anchor is the attempt whose expiry frees the next slot; the
        // log is never empty here since we just pushed.
        let anchor = log.retry_anchor(count, self.limit).unwrap_or(now);
        let retry_at = (anchor + self.window_secs as f64) as i64;
        let remaining = self.limit.saturating_sub(count + 1);

        if !accepted {
            debug!(
                key = %storage_key,
                count = count,
                limit = self.limit,
                "Rate limit exceeded"
            );
        }

        Ok(RateLimit::new(accepted, remaining, self.limit, retry_at))
    }

    /// Restore full capacity for `key` by forgetting its history.
    ///
    /// Resetting a key with no history is a no-op.
    pub async fn reset(&self, key: &str) -> Result<()> {
        let storage_key = self.storage_key(key);
        debug!(key = %storage_key, "Resetting rate limit");
        self.cache.forget(&storage_key).await
    }

    /// Cache key for a rate-limit subject.
    ///
    /// The `ratelimit:{name}:{key}` format is shared state: every limiter
    /// instance with the same name must derive identical keys.
    fn storage_key(&self, key: &str) -> String {
        format!("ratelimit:{}:{}", self.name, key)
    }
}
