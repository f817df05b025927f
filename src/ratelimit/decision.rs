//! Rate limit decision value.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// The outcome of a single [`consume`](crate::ratelimit::RateLimiter::consume)
/// call.
///
/// A terminal, immutable value: produced once per consumption and never
/// updated afterwards. Callers translate it into their own protocol (an
/// HTTP 429, a deferred retry, a dropped message).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    accepted: bool,
    remaining_tokens: u64,
    limit: u64,
    retry_at: i64,
}

impl RateLimit {
    pub(crate) fn new(accepted: bool, remaining_tokens: u64, limit: u64, retry_at: i64) -> Self {
        Self {
            accepted,
            remaining_tokens,
            limit,
            retry_at,
        }
    }

    /// Whether this consumption was within the limit.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Quota left in the window after this consumption.
    pub fn remaining_tokens(&self) -> u64 {
        self.remaining_tokens
    }

    /// The configured limit this decision was made against.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Unix timestamp (seconds) at which the next slot frees up.
    pub fn retry_at(&self) -> i64 {
        self.retry_at.max(0)
    }

    /// Sleep until [`retry_at`](Self::retry_at).
    ///
    /// A convenience for synchronous batch clients that want to pace
    /// themselves; server request paths should read `retry_at()` and
    /// respond instead of blocking. There is no cancellation hook — a
    /// caller needing one must manage its own timer.
    pub async fn wait(&self) {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        let until = self.retry_at() as f64 - now;
        if until > 0.0 {
            tokio::time::sleep(Duration::from_secs_f64(until)).await;
        }
    }
}
