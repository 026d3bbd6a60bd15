//! Cache Utils - key normalization and get-or-default helpers
//!
//! Wraps any key-value cache backend with safe key construction, best-effort
//! writes and type-checked reads that repopulate themselves from a default.
//! Ships a local-memory backend with expiry and LRU culling.

pub mod backend;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod key;
pub mod tasks;
pub mod value;

#[cfg(test)]
mod property_tests;

pub use backend::{AsyncCacheBackend, CacheBackend, Expiry};
pub use cache::LocMemCache;
pub use client::{AsyncFallback, CacheClient, Fallback};
pub use config::Config;
pub use error::{CacheError, Result};
pub use key::{cache_key, normalize, IntoKeyParts, KeyPart, MAX_KEY_LENGTH};
pub use tasks::spawn_cleanup_task;
pub use value::{cache_value, matches_shape, CacheValue, ResultSet};
