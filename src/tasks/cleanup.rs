//! Expiry Sweeper Task
//!
//! Background task that periodically drops expired local-memory entries.
//! Without it, expired entries are only removed when they are read.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LocMemCache;

/// Spawns a task that calls [`LocMemCache::cleanup_expired`] every
/// `cleanup_interval_secs` seconds (at least one).
///
/// Returns the JoinHandle so the caller can abort the task on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(LocMemCache::new(1000));
/// let sweeper = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<LocMemCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting expiry sweeper with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired();
            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CacheBackend, Expiry};
    use crate::value::cache_value;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = Arc::new(LocMemCache::new(100));
        cache
            .set("expire_soon", Some(cache_value(1_u8)), Expiry::Seconds(1))
            .unwrap();

        let handle = spawn_cleanup_task(cache.clone(), 1);

        // Wait for entry to expire and a sweep to run
        tokio::time::sleep(Duration::from_millis(2500)).await;

        // len() does not touch entries, so only the sweeper can have removed it
        assert_eq!(cache.len(), 0, "Expired entry should have been swept");

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = Arc::new(LocMemCache::new(100));
        cache
            .set("long_lived", Some(cache_value(1_u8)), Expiry::Never)
            .unwrap();

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.contains("long_lived"), "Valid entry should not be removed");

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = Arc::new(LocMemCache::new(100));

        let handle = spawn_cleanup_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
