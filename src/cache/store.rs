//! Cache Store Module
//!
//! Single-threaded storage engine behind [`LocMemCache`](super::LocMemCache):
//! a HashMap of entries with LRU culling and per-entry expiry.

use std::collections::HashMap;

use crate::backend::Expiry;
use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::error::{CacheError, Result};
use crate::key::MAX_KEY_LENGTH;
use crate::value::CacheValue;

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl CacheStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Set ==
    /// Stores a value, overwriting any previous entry and resetting its expiry.
    ///
    /// Inserting a new key into a full store first drops expired entries, then
    /// evicts the least recently used one if it is still full.
    pub fn set(&mut self, key: &str, value: Option<CacheValue>, expiry: Expiry) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        let is_overwrite = self.entries.contains_key(key);

        // Dead entries go before any live one is culled
        if !is_overwrite && self.entries.len() >= self.max_entries {
            self.cleanup_expired();
        }

        if !is_overwrite && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted_key) => {
                    self.entries.remove(&evicted_key);
                    self.stats.record_eviction();
                }
                None => {
                    return Err(CacheError::CacheFull(
                        "Cache is full and eviction failed".to_string(),
                    ));
                }
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, expiry));
        self.lru.touch(key);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Returns the stored value of a live entry.
    ///
    /// Missing and expired keys are misses; expired entries are dropped on the spot.
    pub fn get(&mut self, key: &str) -> Option<CacheValue> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).and_then(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes a key; returns false if it was missing or already expired.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.remove_entry(key) {
            Some(entry) => !entry.is_expired(),
            None => false,
        }
    }

    // == Contains ==
    /// True if the key holds a live entry, without counting a hit or miss.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        expired_keys.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }
}
