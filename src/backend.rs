//! Cache Backend Module
//!
//! The key-value store contract the helpers are written against. Backends
//! provide blocking and asynchronous variants of get/set/delete.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::value::CacheValue;

// == Expiry ==
/// How long a stored entry stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expiry {
    /// Expires after the given number of seconds; `0` expires immediately
    Seconds(u64),
    /// Never expires
    Never,
}

impl Expiry {
    /// Returns the lifetime as a Duration, or None for no expiration.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Expiry::Seconds(secs) => Some(Duration::from_secs(*secs)),
            Expiry::Never => None,
        }
    }
}

impl From<u64> for Expiry {
    fn from(secs: u64) -> Self {
        Expiry::Seconds(secs)
    }
}

impl From<Option<u64>> for Expiry {
    fn from(secs: Option<u64>) -> Self {
        secs.map_or(Expiry::Never, Expiry::Seconds)
    }
}

impl From<Duration> for Expiry {
    fn from(duration: Duration) -> Self {
        Expiry::Seconds(duration.as_secs())
    }
}

// == Blocking Backend ==
/// Blocking key-value cache backend.
///
/// `set` with `None` stores the absent value: a later `get` returns `None`
/// while the key still occupies the backend until it expires.
pub trait CacheBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<CacheValue>>;

    fn set(&self, key: &str, value: Option<CacheValue>, expiry: Expiry) -> Result<()>;

    /// Removes a key, returning whether it was present.
    fn delete(&self, key: &str) -> Result<bool>;
}

// == Async Backend ==
/// Non-blocking counterpart of [`CacheBackend`].
#[async_trait]
pub trait AsyncCacheBackend: Send + Sync {
    async fn aget(&self, key: &str) -> Result<Option<CacheValue>>;

    async fn aset(&self, key: &str, value: Option<CacheValue>, expiry: Expiry) -> Result<()>;

    async fn adelete(&self, key: &str) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_conversions() {
        assert_eq!(Expiry::from(30), Expiry::Seconds(30));
        assert_eq!(Expiry::from(None), Expiry::Never);
        assert_eq!(Expiry::from(Some(5)), Expiry::Seconds(5));
        assert_eq!(Expiry::from(Duration::from_millis(2500)), Expiry::Seconds(2));
    }

    #[test]
    fn test_expiry_as_duration() {
        assert_eq!(Expiry::Seconds(3).as_duration(), Some(Duration::from_secs(3)));
        assert_eq!(Expiry::Never.as_duration(), None);
    }
}
