//! In-memory cache for tests and local runs.

use super::Cache;
use crate::error::AuthError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Operation counters, read with [`InMemoryCache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// `get` calls
    pub gets: usize,
    /// `get` calls that found a value
    pub hits: usize,
    /// `set` calls
    pub sets: usize,
    /// `delete` calls
    pub deletes: usize,
}

/// `HashMap`-backed cache with counters.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, String>>,
    gets: AtomicUsize,
    hits: AtomicUsize,
    sets: AtomicUsize,
    deletes: AtomicUsize,
    fail_deletes: AtomicBool,
}

impl InMemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of operation counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            gets: self.gets.load(Ordering::SeqCst),
            hits: self.hits.load(Ordering::SeqCst),
            sets: self.sets.load(Ordering::SeqCst),
            deletes: self.deletes.load(Ordering::SeqCst),
        }
    }

    /// Make every following delete fail with [`AuthError::Cache`].
    /// Failed deletes are still counted.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Whether `key` currently holds a value. Not counted.
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let value = self.entries.read().await.get(key).cloned();
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AuthError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AuthError::cache("delete rejected: connection reset"));
        }
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = InMemoryCache::new();
        assert_eq!(cache.get("k").await.unwrap(), None);

        cache.set("k", "v").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));

        cache.delete("k").await.unwrap();
        assert!(!cache.contains("k").await);

        // Deleting an absent key is fine.
        cache.delete("k").await.unwrap();

        assert_eq!(
            cache.stats(),
            CacheStats {
                gets: 2,
                hits: 1,
                sets: 1,
                deletes: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_failing_delete_keeps_entry() {
        let cache = InMemoryCache::new();
        cache.set("k", "v").await.unwrap();
        cache.fail_deletes(true);

        let err = cache.delete("k").await.unwrap_err();
        assert!(matches!(err, AuthError::Cache(_)));
        assert!(cache.contains("k").await);
        assert_eq!(cache.stats().deletes, 1);
    }
}
