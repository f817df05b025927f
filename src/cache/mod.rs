//! Key-value cache contract and in-process backend.
//!
//! The limiter treats its store as an opaque key-value service: it reads a
//! value, writes a value with a TTL, or forgets a key. Anything that can do
//! those three things — a process-local map, Redis, a replicated cache —
//! can sit behind this trait. Backends that offer server-side atomicity can
//! implement the trait with stronger consistency without any change to the
//! limiter's contract.

mod memory;

pub use memory::MemoryCache;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for cache backend implementations.
///
/// Errors from a backend (e.g. a lost connection) propagate to the caller
/// unmodified; the limiter adds no retry or recovery logic of its own.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Return the value stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, expiring `ttl` from now.
    ///
    /// Overwrites any existing value and its remaining TTL.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Remove the value stored under `key`, if any.
    async fn forget(&self, key: &str) -> Result<()>;
}
