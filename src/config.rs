//! Configuration Module
//!
//! Handles loading cache settings from environment variables.

use std::env;

use crate::backend::Expiry;

/// Built-in default cache duration: 7 days in seconds.
pub const DEFAULT_CACHE_DURATION: u64 = 604_800;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Expiry applied by the helpers when the caller gives none
    pub default_expiry: Expiry,
    /// Maximum number of entries the local-memory cache can hold
    pub max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_CACHE_DURATION` - Seconds, or `none`/`never` (default: 604800)
    /// - `CACHE_MAX_ENTRIES` - Maximum local-memory entries (default: 1000)
    /// - `CACHE_CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            default_expiry: env::var("DEFAULT_CACHE_DURATION")
                .ok()
                .and_then(|v| parse_expiry(&v))
                .unwrap_or(Expiry::Seconds(DEFAULT_CACHE_DURATION)),
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            cleanup_interval: env::var("CACHE_CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_expiry: Expiry::Seconds(DEFAULT_CACHE_DURATION),
            max_entries: 1000,
            cleanup_interval: 60,
        }
    }
}

/// Parses a duration setting: integer seconds, or `none`/`never` for no expiry.
fn parse_expiry(raw: &str) -> Option<Expiry> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") || raw.eq_ignore_ascii_case("never") {
        return Some(Expiry::Never);
    }
    raw.parse().ok().map(Expiry::Seconds)
}
