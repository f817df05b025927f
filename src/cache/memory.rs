//! In-process cache backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use super::Cache;
use crate::error::Result;

/// An in-process [`Cache`] backed by a concurrent map.
///
/// Entries expire lazily: an expired entry is dropped the next time it is
/// read or overwritten. Suitable for single-process deployments and as the
/// standard test backend; it provides no cross-process visibility.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

#[derive(Debug)]
struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.iter().filter(|e| e.expires_at > now).count()
    }

    /// Whether the cache holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Ok(Some(entry.value.clone()));
            }
        }
        // Reap the expired entry rather than leaving it behind.
        self.entries
            .remove_if(key, |_, e| e.expires_at <= Instant::now());
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn forget(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new();

        cache
            .set("key", b"value".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();

        let value = cache.get("key").await.unwrap();
        assert_eq!(value, Some(b"value".to_vec()));
    }

    #[tokio::test]
    async fn test_get_absent_key() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = MemoryCache::new();

        cache
            .set("key", b"value".to_vec(), Duration::from_millis(20))
            .await
            .unwrap();
        assert!(cache.get("key").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.get("key").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_set_overwrites_value_and_ttl() {
        let cache = MemoryCache::new();

        cache
            .set("key", b"old".to_vec(), Duration::from_millis(20))
            .await
            .unwrap();
        cache
            .set("key", b"new".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        // The rewrite extended the TTL past the original expiry.
        assert_eq!(cache.get("key").await.unwrap(), Some(b"new".to_vec()));
    }

    #[tokio::test]
    async fn test_forget_removes_entry() {
        let cache = MemoryCache::new();

        cache
            .set("key", b"value".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();
        cache.forget("key").await.unwrap();

        assert_eq!(cache.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_forget_absent_key_is_noop() {
        let cache = MemoryCache::new();
        cache.forget("missing").await.unwrap();
    }
}
