//! Cache configuration

use std::time::Duration;

/// Seven days, the validity window for both passages and the version list.
const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// TTL (time-to-live) settings for the passage/version cache.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use lectio_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default()
///     .with_passage_ttl(Duration::from_secs(24 * 3600));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for resolved passages.
    ///
    /// Default: 7 days
    pub passage_ttl: Duration,

    /// TTL for the cached version list.
    ///
    /// Default: 7 days
    pub version_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            passage_ttl: DEFAULT_TTL,
            version_ttl: DEFAULT_TTL,
        }
    }
}

impl CacheConfig {
    /// Creates a cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the passage TTL.
    pub fn with_passage_ttl(mut self, ttl: Duration) -> Self {
        self.passage_ttl = ttl;
        self
    }

    /// Sets the version-list TTL.
    pub fn with_version_ttl(mut self, ttl: Duration) -> Self {
        self.version_ttl = ttl;
        self
    }

    /// Creates a config with zero TTLs, so every read misses.
    pub fn no_cache() -> Self {
        Self {
            passage_ttl: Duration::ZERO,
            version_ttl: Duration::ZERO,
        }
    }
}
