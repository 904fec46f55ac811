//! Passage and version caching.
//!
//! Provides a `CacheProvider` trait and implementations for caching JSON
//! payloads keyed by `"<version>:<reference>"` (passages) or a fixed
//! sentinel key (the version list).
//!
//! Expiry is a read-time check, not an async sweep: providers return an
//! entry regardless of age, and the caller decides freshness against its
//! configured TTL via [`CachedValue::is_fresh`]. Stale entries are ignored,
//! not deleted, and a later `set` overwrites them - storage can therefore
//! grow without bound unless an external job calls [`CacheProvider::gc`].

mod config;
mod memory;
mod sqlite;

pub use config::*;
pub use memory::*;
pub use sqlite::*;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

/// A cached payload with the timestamp it was stored at.
#[derive(Debug, Clone)]
pub struct CachedValue {
    /// The cached payload, serialized as JSON bytes.
    pub data: Vec<u8>,
    /// When this value was cached.
    pub cached_at: DateTime<Utc>,
}

impl CachedValue {
    /// Creates a cached value with an explicit timestamp.
    pub fn new(data: Vec<u8>, cached_at: DateTime<Utc>) -> Self {
        Self { data, cached_at }
    }

    /// Creates a cached value timestamped now.
    pub fn new_now(data: Vec<u8>) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Returns `true` if the value is younger than `ttl`.
    pub fn is_fresh(&self, ttl: std::time::Duration) -> bool {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        Utc::now() - self.cached_at < ttl
    }
}

/// Trait for cache providers.
///
/// Implementations store and retrieve values by string key. They do not
/// interpret age: `get` returns whatever is stored, and freshness is the
/// caller's read-time check.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Retrieves a cached value by key, regardless of age.
    async fn get(&self, key: &str) -> Option<CachedValue>;

    /// Stores a value, overwriting any existing entry for the key.
    async fn set(&self, key: &str, value: CachedValue);

    /// Removes a value from the cache.
    async fn remove(&self, key: &str);

    /// Clears all values from the cache.
    async fn clear(&self);

    /// Removes entries older than `ttl`. Returns the number removed.
    ///
    /// Never called by the resolution core; intended for an external
    /// compaction job.
    async fn gc(&self, ttl: std::time::Duration) -> usize;
}
