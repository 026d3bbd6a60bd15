//! Cache Module
//!
//! Local-memory backend with per-entry expiry and LRU culling.

mod entry;
mod locmem;
mod lru;
mod stats;
mod store;

// Re-export public types
pub use entry::CacheEntry;
pub use locmem::LocMemCache;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;
