//! In-process TTL cache.
//!
//! Serves as the secondary tier of last resort when Redis is unreachable,
//! and as the cache double in tests. Entries are purged lazily on access;
//! with 600-second reset-token TTLs and a bounded request rate this keeps
//! the map small without a sweeper task.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use super::KeyValueCache;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory key-value cache with per-entry expiry.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueCache for MemoryCache {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), String> {
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| !e.is_expired());
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + Duration::from_secs(expiry_seconds),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|e| !e.is_expired())
            .map(|e| e.value.clone()))
    }

    async fn take(&self, key: &str) -> Result<Option<String>, String> {
        // Single write lock makes read-then-delete one step.
        let mut entries = self.entries.write().await;
        match entries.remove(key) {
            Some(entry) if !entry.is_expired() => Ok(Some(entry.value)),
            _ => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new();
        cache.set_with_expiry("k", "v", 60).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_take_consumes_value() {
        let cache = MemoryCache::new();
        cache.set_with_expiry("k", "v", 60).await.unwrap();

        assert_eq!(cache.take("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(cache.take("k").await.unwrap(), None);
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire() {
        let cache = MemoryCache::new();
        cache.set_with_expiry("k", "v", 600).await.unwrap();

        tokio::time::advance(Duration::from_secs(599)).await;
        assert!(cache.get("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert_eq!(cache.take("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let cache = MemoryCache::new();
        cache.set_with_expiry("k", "v", 60).await.unwrap();
        cache.delete("k").await.unwrap();
        cache.delete("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite_refreshes_value() {
        let cache = MemoryCache::new();
        cache.set_with_expiry("k", "v1", 60).await.unwrap();
        cache.set_with_expiry("k", "v2", 60).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v2".to_string()));
    }
}
