//! Persisted attempt history for a single rate-limited key.

use serde::{Deserialize, Serialize};

/// Current schema version for the persisted log.
const LOG_VERSION: u8 = 1;

/// The ordered history of consumption attempts for one `(name, key)` pair.
///
/// This is the value stored in the cache: a versioned record holding the
/// unix timestamps (fractional seconds) of attempts still inside the
/// window, oldest first. Versioning distinguishes "absent" from "empty"
/// and leaves room for schema evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptLog {
    version: u8,
    entries: Vec<f64>,
}

impl AttemptLog {
    /// Create an empty log at the current schema version.
    pub fn new() -> Self {
        Self {
            version: LOG_VERSION,
            entries: Vec::new(),
        }
    }

    /// Decode a stored value.
    ///
    /// Anything that fails to parse, or carries an unknown version, is
    /// normalized to an empty log rather than raised: stale or mangled
    /// cache state means "no prior attempts".
    pub fn decode(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<AttemptLog>(bytes) {
            Ok(log) if log.version == LOG_VERSION => log,
            _ => Self::new(),
        }
    }

    /// Encode the log for storage.
    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Drop every entry at or before `cutoff`, keeping only entries
    /// strictly newer.
    pub fn prune(&mut self, cutoff: f64) {
        self.entries.retain(|&ts| ts > cutoff);
    }

    /// Record an attempt at `now`.
    ///
    /// Timestamps are expected to arrive in non-decreasing order; entries
    /// are kept in arrival order.
    pub fn push(&mut self, now: f64) {
        self.entries.push(now);
    }

    /// Number of recorded attempts.
    pub fn len(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Whether the log holds no attempts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The timestamp whose expiry frees the next slot.
    ///
    /// `count` is the log size before the current attempt was pushed. On a
    /// saturated key this selects the entry at position `count + 1 - limit`
    /// of the post-push log; when the log is shorter than the limit it
    /// falls back to the oldest entry. Returns `None` only for an empty
    /// log.
    pub fn retry_anchor(&self, count: u64, limit: u64) -> Option<f64> {
        (count + 1)
            .checked_sub(limit)
            .and_then(|i| self.entries.get(i as usize))
            .or_else(|| self.entries.first())
            .copied()
    }
}

impl Default for AttemptLog {
    fn default() -> Self {
        Self::new()
    }
}
