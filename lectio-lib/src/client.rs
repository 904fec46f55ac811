//! Main LectioClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::cache::CacheConfig;
use crate::cache::CacheProvider;
use crate::model::VerseSource;
use crate::registry::ProviderCatalog;
use crate::registry::VersionRegistry;
use crate::source::ApiBibleSource;
use crate::source::BibleApiSource;
use crate::source::EsvSource;
use crate::source::LocalSource;
use crate::source::NltSource;
use crate::source::PassageSource;

/// Default bounded per-source timeout. An unresponsive upstream would
/// otherwise stall the entire fallback chain.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The main client for resolving scripture references.
///
/// Cheap to clone (uses `Arc` internally) and safe to share across threads.
/// Every upstream source is optional: a source whose API key is missing
/// participates in the fallback chain as always-failing rather than
/// preventing construction.
///
/// # Example
///
/// ```ignore
/// use lectio_lib::LectioClient;
/// use lectio_lib::cache::InMemoryCache;
///
/// let client = LectioClient::builder()
///     .esv_api_key("my-key")
///     .cache(InMemoryCache::new())
///     .build();
///
/// let verses = client.resolve_passage("ESV", "John 3:16", true).await?;
/// ```
#[derive(Clone)]
pub struct LectioClient {
    pub(crate) inner: Arc<LectioClientInner>,
}

pub(crate) struct LectioClientInner {
    pub(crate) registry: Arc<VersionRegistry>,
    pub(crate) sources: Vec<Arc<dyn PassageSource>>,
    pub(crate) local: Option<Arc<LocalSource>>,
    pub(crate) cache: Option<Arc<dyn CacheProvider>>,
    pub(crate) cache_config: CacheConfig,
}

impl LectioClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> LectioClientBuilder {
        LectioClientBuilder::new()
    }

    /// Returns the version registry.
    pub fn registry(&self) -> &VersionRegistry {
        &self.inner.registry
    }

    /// Returns the source for a given provider tag, if one is registered.
    pub(crate) fn source_for(&self, tag: VerseSource) -> Option<&Arc<dyn PassageSource>> {
        self.inner.sources.iter().find(|s| s.source() == tag)
    }
}

/// Builder for constructing a [`LectioClient`].
///
/// # Example
///
/// ```ignore
/// let client = LectioClient::builder()
///     .esv_api_key(esv_key)
///     .api_bible_key(bible_key)
///     .timeout(Duration::from_secs(5))
///     .cache(SqliteCache::open("cache.db").await?)
///     .build();
/// ```
pub struct LectioClientBuilder {
    esv_api_key: Option<String>,
    api_bible_key: Option<String>,
    nlt_api_key: Option<String>,
    timeout: Duration,
    http_client: Option<Client>,
    catalog: ProviderCatalog,
    cache: Option<Arc<dyn CacheProvider>>,
    cache_config: CacheConfig,
    local_store: Option<LocalSource>,
    source_overrides: Vec<Arc<dyn PassageSource>>,
}

impl LectioClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            esv_api_key: None,
            api_bible_key: None,
            nlt_api_key: None,
            timeout: DEFAULT_TIMEOUT,
            http_client: None,
            catalog: ProviderCatalog::default(),
            cache: None,
            cache_config: CacheConfig::default(),
            local_store: None,
            source_overrides: Vec::new(),
        }
    }

    /// Sets the ESV API key.
    pub fn esv_api_key(mut self, key: impl Into<String>) -> Self {
        self.esv_api_key = Some(key.into());
        self
    }

    /// Sets the API.Bible key.
    pub fn api_bible_key(mut self, key: impl Into<String>) -> Self {
        self.api_bible_key = Some(key.into());
        self
    }

    /// Sets the NLT API key.
    pub fn nlt_api_key(mut self, key: impl Into<String>) -> Self {
        self.nlt_api_key = Some(key.into());
        self
    }

    /// Sets the per-source request timeout.
    ///
    /// Defaults to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replaces the provider catalog.
    pub fn catalog(mut self, catalog: ProviderCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets the cache provider. Without one, every fetch goes upstream.
    pub fn cache<C: CacheProvider + 'static>(mut self, cache: C) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Sets the cache TTL configuration.
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Sets the local verse store.
    pub fn local_store(mut self, store: LocalSource) -> Self {
        self.local_store = Some(store);
        self
    }

    /// Replaces the registered source with the same provider tag, or adds
    /// the source if none carries that tag. Tests use this to substitute
    /// scripted fixtures.
    pub fn source(mut self, source: Arc<dyn PassageSource>) -> Self {
        self.source_overrides.push(source);
        self
    }

    /// Builds the [`LectioClient`].
    pub fn build(self) -> LectioClient {
        let http_client = self.http_client.unwrap_or_default();
        let registry = Arc::new(VersionRegistry::new(self.catalog));
        let timeout = Some(self.timeout);

        let local = self.local_store.map(Arc::new);

        let mut sources: Vec<Arc<dyn PassageSource>> = vec![
            Arc::new(EsvSource::new(
                http_client.clone(),
                self.esv_api_key,
                timeout,
            )),
            Arc::new(ApiBibleSource::new(
                http_client.clone(),
                self.api_bible_key,
                timeout,
                Arc::clone(&registry),
            )),
            Arc::new(NltSource::new(
                http_client.clone(),
                self.nlt_api_key,
                timeout,
            )),
            Arc::new(BibleApiSource::new(http_client, timeout)),
        ];
        if let Some(local) = &local {
            sources.push(Arc::clone(local) as Arc<dyn PassageSource>);
        }

        for replacement in self.source_overrides {
            match sources.iter_mut().find(|s| s.source() == replacement.source()) {
                Some(slot) => *slot = replacement,
                None => sources.push(replacement),
            }
        }

        LectioClient {
            inner: Arc::new(LectioClientInner {
                registry,
                sources,
                local,
                cache: self.cache,
                cache_config: self.cache_config,
            }),
        }
    }
}

impl Default for LectioClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
