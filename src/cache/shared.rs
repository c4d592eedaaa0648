//! Shared Cache Handle
//!
//! Async, cloneable front for a [`CacheStore`] plus the cache-aside loader.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore};

// == Shared Cache ==
/// Cloneable handle to a cache store guarded by a tokio `RwLock`.
///
/// Every clone refers to the same store. The process composition root creates
/// one per cache and hands clones to whoever needs it.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self::from_store(CacheStore::new(max_entries, default_ttl))
    }

    pub fn from_store(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // == Load Or Compute ==
    /// Returns the cached value for `key`, or runs `producer` and caches its
    /// result.
    ///
    /// The lock is released while `producer` runs. Two callers racing on the
    /// same cold key will therefore both invoke their producer and the later
    /// write wins; in-flight loads are not coalesced.
    ///
    /// A producer error is returned as-is and leaves the cache untouched.
    pub async fn load_or_compute<F, Fut, E>(
        &self,
        key: &str,
        producer: F,
        ttl: Option<Duration>,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        debug!(key, "cache miss, invoking producer");
        let value = producer().await?;

        self.inner.write().await.set(key, value.clone(), ttl);
        Ok(value)
    }

    // Get needs the write lock: it bumps hit counts and drops expired entries
    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.write().await.get(key)
    }

    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.inner.write().await.set(key, value, ttl);
    }

    pub async fn has(&self, key: &str) -> bool {
        self.inner.write().await.has(key)
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    pub async fn cleanup(&self) -> usize {
        self.inner.write().await.cleanup()
    }

    /// Empties the cache and restarts its counters. Returns entries dropped.
    pub async fn reset(&self) -> usize {
        self.inner.write().await.reset()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    // == Invalidate ==
    /// Drops every entry whose key starts with `scope`.
    ///
    /// Safe on an empty cache. Returns the number of entries removed.
    pub async fn invalidate(&self, scope: &str) -> usize {
        let removed = self.inner.write().await.invalidate_prefix(scope);
        if removed > 0 {
            info!(scope, removed, "invalidated cache entries");
        }
        removed
    }

    // == Upsert One ==
    /// Applies `f` to the single cached record under `key`, leaving every
    /// other entry alone.
    ///
    /// Returns false if nothing live is cached under `key`; callers that need
    /// the record present should `set` it instead.
    pub async fn upsert_one<F>(&self, key: &str, f: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        self.inner.write().await.update(key, f)
    }
}
