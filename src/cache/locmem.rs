//! Local-memory cache backend.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::backend::{AsyncCacheBackend, CacheBackend, Expiry};
use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::Result;
use crate::value::CacheValue;

/// Thread-safe in-process cache with expiry and LRU culling.
///
/// Share it between tasks with `Arc<LocMemCache>`. The async methods take the
/// same lock as the blocking ones; it is never held across an `.await`.
#[derive(Debug)]
pub struct LocMemCache {
    store: Mutex<CacheStore>,
}

impl LocMemCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Mutex::new(CacheStore::new(max_entries)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_entries)
    }

    /// True if the key holds a live entry (possibly the absent value).
    pub fn contains(&self, key: &str) -> bool {
        self.store.lock().contains(key)
    }

    pub fn clear(&self) {
        self.store.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    /// Drops every expired entry; returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        self.store.lock().cleanup_expired()
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }
}

impl Default for LocMemCache {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CacheBackend for LocMemCache {
    fn get(&self, key: &str) -> Result<Option<CacheValue>> {
        Ok(self.store.lock().get(key))
    }

    fn set(&self, key: &str, value: Option<CacheValue>, expiry: Expiry) -> Result<()> {
        self.store.lock().set(key, value, expiry)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.store.lock().delete(key))
    }
}

#[async_trait]
impl AsyncCacheBackend for LocMemCache {
    async fn aget(&self, key: &str) -> Result<Option<CacheValue>> {
        CacheBackend::get(self, key)
    }

    async fn aset(&self, key: &str, value: Option<CacheValue>, expiry: Expiry) -> Result<()> {
        CacheBackend::set(self, key, value, expiry)
    }

    async fn adelete(&self, key: &str) -> Result<bool> {
        CacheBackend::delete(self, key)
    }
}
