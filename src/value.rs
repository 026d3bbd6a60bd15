//! Cached Value Module
//!
//! Values are stored type-erased, like objects in a dynamically typed cache.
//! Readers check the runtime shape of what comes back before trusting it.

use std::any::Any;
use std::sync::Arc;

/// A shared, type-erased cached value.
pub type CacheValue = Arc<dyn Any + Send + Sync>;

/// Wraps a value for storage.
///
/// A value that is already a [`CacheValue`] is returned unchanged instead of
/// being wrapped a second time.
pub fn cache_value<T: Any + Send + Sync>(value: T) -> CacheValue {
    let boxed: Box<dyn Any + Send + Sync> = Box::new(value);
    match boxed.downcast::<CacheValue>() {
        Ok(inner) => *inner,
        Err(other) => Arc::from(other),
    }
}

// == Result Set ==
/// A result-set container whose rows are all of type `T`.
///
/// It matches `T` during shape validation even when it holds no rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet<T> {
    rows: Vec<T>,
}

impl<T> Default for ResultSet<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> ResultSet<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }
}

impl<T> From<Vec<T>> for ResultSet<T> {
    fn from(rows: Vec<T>) -> Self {
        Self::new(rows)
    }
}

// == Shape Matching ==
/// Returns true if `value` is acceptable as a cached `T`.
///
/// Accepted shapes:
/// - a `T`
/// - a `ResultSet<T>`, empty or not
/// - a non-empty `Vec<T>`
/// - a non-empty `Vec<CacheValue>` whose first element is a `T`
pub fn matches_shape<T: Any>(value: &CacheValue) -> bool {
    if value.is::<T>() || value.is::<ResultSet<T>>() {
        return true;
    }
    if let Some(items) = value.downcast_ref::<Vec<T>>() {
        return !items.is_empty();
    }
    if let Some(items) = value.downcast_ref::<Vec<CacheValue>>() {
        return items.first().is_some_and(|first| first.is::<T>());
    }
    false
}
