//! SQLite-backed persistent cache implementation.

use std::path::Path;

use async_sqlite::rusqlite;
use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_sqlite::JournalMode;
use async_trait::async_trait;
use chrono::TimeZone;
use chrono::Utc;

use super::CacheProvider;
use super::CachedValue;

/// A persistent cache backed by SQLite, over the `bible_verse_cache` table:
/// `{ key, payload (opaque JSON), cached_at }`, upsert-by-key.
///
/// Data persists across process restarts. Uses WAL journal mode for better
/// concurrent read performance. Stale entries stay on disk until an external
/// job calls [`CacheProvider::gc`].
pub struct SqliteCache {
    client: Client,
}

impl SqliteCache {
    /// Opens a SQLite cache at the specified path.
    ///
    /// Creates the database file and cache table if they don't exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, async_sqlite::Error> {
        let client = ClientBuilder::new()
            .path(path)
            .journal_mode(JournalMode::Wal)
            .open()
            .await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    /// Opens an in-memory SQLite cache.
    ///
    /// Useful for testing. Data is lost when the cache is dropped.
    pub async fn open_in_memory() -> Result<Self, async_sqlite::Error> {
        let client = ClientBuilder::new().path(":memory:").open().await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    /// Initializes the cache table schema.
    async fn init_schema(client: &Client) -> Result<(), async_sqlite::Error> {
        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS bible_verse_cache (
                        key TEXT PRIMARY KEY,
                        payload BLOB NOT NULL,
                        cached_at INTEGER NOT NULL
                    )",
                    [],
                )?;
                // Index for efficient GC queries
                conn.execute(
                    "CREATE INDEX IF NOT EXISTS idx_bible_verse_cache_cached_at
                     ON bible_verse_cache(cached_at)",
                    [],
                )?;
                Ok(())
            })
            .await
    }

    /// Returns the number of entries in the cache, stale ones included.
    pub async fn len(&self) -> Result<usize, async_sqlite::Error> {
        self.client
            .conn(|conn| {
                conn.query_row("SELECT COUNT(*) FROM bible_verse_cache", [], |row| {
                    row.get::<_, i64>(0)
                })
                .map(|count| count as usize)
            })
            .await
    }

    /// Returns `true` if the cache is empty.
    pub async fn is_empty(&self) -> Result<bool, async_sqlite::Error> {
        self.len().await.map(|len| len == 0)
    }
}

#[async_trait]
impl CacheProvider for SqliteCache {
    async fn get(&self, key: &str) -> Option<CachedValue> {
        let key = key.to_string();

        let result = self
            .client
            .conn(move |conn| {
                conn.query_row(
                    "SELECT payload, cached_at FROM bible_verse_cache WHERE key = ?",
                    [key],
                    |row| {
                        let payload: Vec<u8> = row.get(0)?;
                        let cached_at: i64 = row.get(1)?;
                        Ok((payload, cached_at))
                    },
                )
            })
            .await;

        match result {
            Ok((payload, cached_at)) => {
                let cached_at = Utc.timestamp_opt(cached_at, 0).single()?;
                Some(CachedValue::new(payload, cached_at))
            }
            Err(_) => None,
        }
    }

    async fn set(&self, key: &str, value: CachedValue) {
        let key = key.to_string();
        let payload = value.data;
        let cached_at = value.cached_at.timestamp();

        let _ = self
            .client
            .conn(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO bible_verse_cache (key, payload, cached_at)
                     VALUES (?, ?, ?)",
                    rusqlite::params![key, payload, cached_at],
                )
            })
            .await;
    }

    async fn remove(&self, key: &str) {
        let key = key.to_string();

        let _ = self
            .client
            .conn(move |conn| conn.execute("DELETE FROM bible_verse_cache WHERE key = ?", [key]))
            .await;
    }

    async fn clear(&self) {
        let _ = self
            .client
            .conn(|conn| conn.execute("DELETE FROM bible_verse_cache", []))
            .await;
    }

    async fn gc(&self, ttl: std::time::Duration) -> usize {
        let cutoff = Utc::now().timestamp() - ttl.as_secs() as i64;

        self.client
            .conn(move |conn| {
                conn.execute("DELETE FROM bible_verse_cache WHERE cached_at <= ?", [cutoff])
            })
            .await
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_roundtrip_and_overwrite() {
        let cache = SqliteCache::open_in_memory().await.unwrap();

        cache
            .set("kjv:John 3:16", CachedValue::new_now(b"[1]".to_vec()))
            .await;
        cache
            .set("kjv:John 3:16", CachedValue::new_now(b"[2]".to_vec()))
            .await;

        let got = cache.get("kjv:John 3:16").await.unwrap();
        assert_eq!(got.data, b"[2]");
        assert_eq!(cache.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stale_entries_survive_until_gc() {
        let cache = SqliteCache::open_in_memory().await.unwrap();
        let stale = CachedValue::new(b"[]".to_vec(), Utc::now() - chrono::Duration::days(8));
        cache.set("old", stale).await;

        // Present on read, just stale by the caller's TTL.
        let got = cache.get("old").await.unwrap();
        assert!(!got.is_fresh(Duration::from_secs(7 * 24 * 3600)));

        let removed = cache.gc(Duration::from_secs(7 * 24 * 3600)).await;
        assert_eq!(removed, 1);
        assert!(cache.get("old").await.is_none());
    }
}
