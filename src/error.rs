//! Error types for the cache helpers
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache backends and helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key rejected by the backend (too long, malformed)
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Cache is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Any other backend failure
    #[error("Backend error: {0}")]
    Backend(String),
}

impl CacheError {
    /// Shorthand for a generic backend failure.
    pub fn backend(msg: impl Into<String>) -> Self {
        CacheError::Backend(msg.into())
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
