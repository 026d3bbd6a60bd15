//! Cache Entry Module
//!
//! A stored value plus its expiration metadata.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::backend::Expiry;
use crate::value::CacheValue;

// == Cache Entry ==
/// A single local-memory entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value; None is the absent value written by deletes
    pub value: Option<CacheValue>,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry that expires according to `expiry`.
    pub fn new(value: Option<CacheValue>, expiry: Expiry) -> Self {
        let now = current_timestamp_ms();
        let expires_at = match expiry {
            Expiry::Seconds(secs) => Some(now.saturating_add(secs.saturating_mul(1000))),
            Expiry::Never => None,
        };

        Self {
            value,
            expires_at,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiration time,
    /// so a zero-second expiry is never readable.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        self.expires_at.is_some_and(|expires| now_ms >= expires)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
