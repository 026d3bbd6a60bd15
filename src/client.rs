//! Cache Client Module
//!
//! Convenience operations over a [`CacheBackend`] / [`AsyncCacheBackend`]:
//! normalized keys, best-effort writes, shape-validated reads that fall back
//! to a default and repopulate the cache, and two-step deletes.
//!
//! Writes never fail from the caller's point of view: backend errors are
//! logged and dropped. Reads and deletes propagate backend errors.

use std::any::{type_name, Any};
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{debug, error};

use crate::backend::{AsyncCacheBackend, CacheBackend, Expiry};
use crate::config::Config;
use crate::error::Result;
use crate::key::{cache_key, IntoKeyParts};
use crate::value::{cache_value, matches_shape, CacheValue};

/// Lifetime of the absent value written before a delete.
const DELETE_GRACE: Expiry = Expiry::Seconds(1);

/// Log description of the absent value.
const ABSENT: &str = "absent";

// == Fallback ==
/// Default used by [`CacheClient::get_or_default`] on a miss.
pub enum Fallback {
    /// A ready value
    Value(CacheValue),
    /// Computed only when needed
    Compute(Box<dyn FnOnce() -> CacheValue + Send>),
}

impl Fallback {
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Fallback::Value(cache_value(value))
    }

    pub fn compute<T, F>(f: F) -> Self
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T + Send + 'static,
    {
        Fallback::Compute(Box::new(move || cache_value(f())))
    }

    fn resolve(self) -> CacheValue {
        match self {
            Fallback::Value(value) => value,
            Fallback::Compute(f) => f(),
        }
    }
}

// == Async Fallback ==
/// Default used by [`CacheClient::aget_or_default`]; may also be a future.
pub enum AsyncFallback {
    Value(CacheValue),
    Compute(Box<dyn FnOnce() -> CacheValue + Send>),
    /// Awaited only when needed
    Future(BoxFuture<'static, CacheValue>),
}

impl AsyncFallback {
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Fallback::value(value).into()
    }

    pub fn compute<T, F>(f: F) -> Self
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T + Send + 'static,
    {
        Fallback::compute(f).into()
    }

    pub fn future<T, Fut>(fut: Fut) -> Self
    where
        T: Any + Send + Sync,
        Fut: Future<Output = T> + Send + 'static,
    {
        AsyncFallback::Future(fut.map(cache_value).boxed())
    }

    async fn resolve(self) -> CacheValue {
        match self {
            AsyncFallback::Value(value) => value,
            AsyncFallback::Compute(f) => f(),
            AsyncFallback::Future(fut) => fut.await,
        }
    }
}

impl From<Fallback> for AsyncFallback {
    fn from(fallback: Fallback) -> Self {
        match fallback {
            Fallback::Value(value) => AsyncFallback::Value(value),
            Fallback::Compute(f) => AsyncFallback::Compute(f),
        }
    }
}

// == Cache Client ==
/// Helper operations bound to one backend.
///
/// The default expiry is captured when the client is built; later changes to
/// the environment are not seen by an existing client.
#[derive(Debug)]
pub struct CacheClient<B> {
    backend: Arc<B>,
    default_expiry: Expiry,
}

impl<B> Clone for CacheClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            default_expiry: self.default_expiry,
        }
    }
}

impl<B> CacheClient<B> {
    /// Builds a client, reading the default expiry from the environment once.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, &Config::from_env())
    }

    pub fn with_config(backend: B, config: &Config) -> Self {
        Self::from_shared(Arc::new(backend), config.default_expiry)
    }

    /// Builds a client over a backend that is also used elsewhere.
    pub fn from_shared(backend: Arc<B>, default_expiry: Expiry) -> Self {
        Self {
            backend,
            default_expiry,
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn default_expiry(&self) -> Expiry {
        self.default_expiry
    }
}

// == Blocking Operations ==
impl<B: CacheBackend> CacheClient<B> {
    /// Caches a value for the default expiry. Never fails.
    pub fn set<T: Any + Send + Sync>(&self, key: impl IntoKeyParts, value: T) {
        self.set_with_expiry(key, value, self.default_expiry);
    }

    /// Caches a value for `expiry`. Backend errors are logged and dropped.
    pub fn set_with_expiry<T: Any + Send + Sync>(
        &self,
        key: impl IntoKeyParts,
        value: T,
        expiry: Expiry,
    ) {
        self.store(
            &cache_key(key),
            Some(cache_value(value)),
            type_name::<T>(),
            expiry,
        );
    }

    /// Returns the cached value if it has the shape of a `T`, else the default.
    ///
    /// A resolved default is cached under the same key for the default expiry.
    /// Without a default, a miss or a mismatched value yields `None`.
    pub fn get_or_default<T: Any>(
        &self,
        key: impl IntoKeyParts,
        default: Option<Fallback>,
    ) -> Result<Option<CacheValue>> {
        self.get_or_default_with_expiry::<T>(key, default, self.default_expiry)
    }

    pub fn get_or_default_with_expiry<T: Any>(
        &self,
        key: impl IntoKeyParts,
        default: Option<Fallback>,
        expiry: Expiry,
    ) -> Result<Option<CacheValue>> {
        let key = cache_key(key);
        if let Some(value) = self.backend.get(&key)? {
            if matches_shape::<T>(&value) {
                return Ok(Some(value));
            }
            debug!("Cached value for {} has an unexpected type", key);
        }

        let Some(default) = default else {
            return Ok(None);
        };
        let value = default.resolve();
        debug!("Repopulating {} with default value", key);
        self.store(&key, Some(value.clone()), "default", expiry);
        Ok(Some(value))
    }

    /// Clears a key: writes the absent value for one second, then deletes it.
    pub fn delete(&self, key: impl IntoKeyParts) -> Result<()> {
        let key = cache_key(key);
        self.store(&key, None, ABSENT, DELETE_GRACE);
        self.backend.delete(&key)?;
        Ok(())
    }

    /// `described` names the value in the error log, since `dyn Any` has no Debug output.
    fn store(&self, key: &str, value: Option<CacheValue>, described: &str, expiry: Expiry) {
        if let Err(err) = self.backend.set(key, value, expiry) {
            error!(
                "Error on value caching for key={} value={} expiry={:?}: {}",
                key, described, expiry, err
            );
        }
    }
}

// == Async Operations ==
impl<B: AsyncCacheBackend> CacheClient<B> {
    /// Async [`set`](Self::set). Dropping the future before it completes
    /// abandons the write.
    pub async fn aset<T: Any + Send + Sync>(&self, key: impl IntoKeyParts, value: T) {
        self.aset_with_expiry(key, value, self.default_expiry).await;
    }

    pub async fn aset_with_expiry<T: Any + Send + Sync>(
        &self,
        key: impl IntoKeyParts,
        value: T,
        expiry: Expiry,
    ) {
        self.astore(
            &cache_key(key),
            Some(cache_value(value)),
            type_name::<T>(),
            expiry,
        )
        .await;
    }

    pub async fn aget_or_default<T: Any>(
        &self,
        key: impl IntoKeyParts,
        default: Option<AsyncFallback>,
    ) -> Result<Option<CacheValue>> {
        self.aget_or_default_with_expiry::<T>(key, default, self.default_expiry)
            .await
    }

    /// Async [`get_or_default_with_expiry`](Self::get_or_default_with_expiry);
    /// a future default is awaited before it is cached.
    pub async fn aget_or_default_with_expiry<T: Any>(
        &self,
        key: impl IntoKeyParts,
        default: Option<AsyncFallback>,
        expiry: Expiry,
    ) -> Result<Option<CacheValue>> {
        let key = cache_key(key);
        if let Some(value) = self.backend.aget(&key).await? {
            if matches_shape::<T>(&value) {
                return Ok(Some(value));
            }
            debug!("Cached value for {} has an unexpected type", key);
        }

        let Some(default) = default else {
            return Ok(None);
        };
        let value = default.resolve().await;
        debug!("Repopulating {} with default value", key);
        self.astore(&key, Some(value.clone()), "default", expiry)
            .await;
        Ok(Some(value))
    }

    pub async fn adelete(&self, key: impl IntoKeyParts) -> Result<()> {
        let key = cache_key(key);
        self.astore(&key, None, ABSENT, DELETE_GRACE).await;
        self.backend.adelete(&key).await?;
        Ok(())
    }

    async fn astore(
        &self,
        key: &str,
        value: Option<CacheValue>,
        described: &str,
        expiry: Expiry,
    ) {
        if let Err(err) = self.backend.aset(key, value, expiry).await {
            error!(
                "Error on value caching for key={} value={} expiry={:?}: {}",
                key, described, expiry, err
            );
        }
    }
}
