//! Background Tasks Module
//!
//! Long-running tokio tasks that maintain the local-memory cache.

pub mod cleanup;

pub use cleanup::spawn_cleanup_task;
