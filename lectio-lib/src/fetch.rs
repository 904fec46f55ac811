//! Passage resolution and multi-source fallback.
//!
//! The orchestration layer behind [`LectioClient::resolve_passage`]: cache
//! gate, fast-path attempt against the version's configured primary source,
//! then an ordered fallback chain until one source yields non-empty verses
//! or the chain is exhausted. Chain order encodes a deliberate cost/quality
//! preference and is never reordered or parallelized; a multi-reference
//! request resolves its references sequentially.

use tracing::debug;
use tracing::warn;

use crate::cache::CachedValue;
use crate::error::Error;
use crate::model::BibleVersion;
use crate::model::ParsedReference;
use crate::model::Verse;
use crate::model::VerseSource;
use crate::reference;
use crate::response::Response;
use crate::source::PassageSource;
use crate::LectioClient;

/// Sentinel cache key for the version list.
const CACHE_KEY_VERSIONS: &str = "bible_versions";

/// Fallback order tried after the configured primary source. The alternate
/// licensed source (NLT) is skipped for versions it carries no translation
/// id for; the local store is the ultimate fallback.
const FALLBACK_ORDER: [VerseSource; 4] = [
    VerseSource::ApiBible,
    VerseSource::Nlt,
    VerseSource::BibleApi,
    VerseSource::Local,
];

impl LectioClient {
    /// Lists the available Bible versions.
    ///
    /// Checks the cache under the sentinel key first; on miss returns the
    /// curated registry catalog and caches it. Versions are not discovered
    /// dynamically from providers.
    pub async fn list_versions(&self) -> Result<Response<Vec<BibleVersion>>, Error> {
        let ttl = self.inner.cache_config.version_ttl;
        if let Some(cache) = &self.inner.cache {
            if let Some(cached) = cache.get(CACHE_KEY_VERSIONS).await {
                if cached.is_fresh(ttl) {
                    if let Ok(versions) = serde_json::from_slice::<Vec<BibleVersion>>(&cached.data)
                    {
                        debug!("version list served from cache");
                        return Ok(Response::cache_hit(versions, cached.cached_at));
                    }
                }
            }
        }

        let versions = self.inner.registry.versions().to_vec();

        if let Some(cache) = &self.inner.cache {
            if let Ok(payload) = serde_json::to_vec(&versions) {
                let value = CachedValue::new_now(payload);
                let cached_at = value.cached_at;
                cache.set(CACHE_KEY_VERSIONS, value).await;
                return Ok(Response::cache_miss(versions, cached_at));
            }
        }

        Ok(Response::new(versions))
    }

    /// Resolves a citation string to verse text for a version.
    ///
    /// The terminal failure mode is an *empty list*, not an error: when no
    /// source can supply the passage, callers render a content-unavailable
    /// state rather than retrying. Only caller bugs (an empty reference
    /// string) return `Err`.
    ///
    /// Cache reads and writes happen only for authenticated callers:
    /// anonymous traffic neither seeds nor relies on shared cache state.
    pub async fn resolve_passage(
        &self,
        version: &str,
        reference: &str,
        authenticated: bool,
    ) -> Result<Response<Vec<Verse>>, Error> {
        let version = version.trim();
        let reference = reference.trim();
        if version.is_empty() {
            return Err(Error::InvalidReference("empty version".to_string()));
        }
        if reference.is_empty() {
            return Err(Error::InvalidReference("empty reference".to_string()));
        }

        let cache_key = format!("{version}:{reference}");
        let ttl = self.inner.cache_config.passage_ttl;

        if authenticated {
            if let Some(cache) = &self.inner.cache {
                if let Some(cached) = cache.get(&cache_key).await {
                    if cached.is_fresh(ttl) {
                        if let Ok(verses) = serde_json::from_slice::<Vec<Verse>>(&cached.data) {
                            debug!(reference, version, "passage served from cache");
                            return Ok(Response::cache_hit(verses, cached.cached_at));
                        }
                    }
                }
            }
        }

        let verses = match reference::parse(reference) {
            Ok(parsed) => self.fetch_chain(version, &parsed).await,
            Err(err) => {
                // The strict grammar gave up; the local store's permissive
                // matcher is the only path left for this reference.
                debug!(reference, %err, "reference failed parsing, trying local re-match");
                match &self.inner.local {
                    Some(local) => match local.search_raw(reference).await {
                        Ok(verses) => verses,
                        Err(err) => {
                            warn!(reference, %err, "local re-match failed");
                            Vec::new()
                        }
                    },
                    None => Vec::new(),
                }
            }
        };

        if !verses.is_empty() && authenticated {
            if let Some(cache) = &self.inner.cache {
                if let Ok(payload) = serde_json::to_vec(&verses) {
                    let value = CachedValue::new_now(payload);
                    let cached_at = value.cached_at;
                    cache.set(&cache_key, value).await;
                    return Ok(Response::cache_miss(verses, cached_at));
                }
            }
        }

        Ok(Response::new(verses))
    }

    /// Resolves several citations sequentially and concatenates the verses.
    ///
    /// Each reference is independent; one falling through to empty never
    /// aborts the rest.
    pub async fn resolve_multiple(
        &self,
        version: &str,
        references: &[&str],
        authenticated: bool,
    ) -> Result<Vec<Verse>, Error> {
        let mut verses = Vec::new();
        for reference in references {
            let response = self.resolve_passage(version, reference, authenticated).await?;
            verses.extend(response.into_inner());
        }
        Ok(verses)
    }

    /// Tries the configured primary source, then the fallback chain,
    /// stopping at the first source returning non-empty verses.
    async fn fetch_chain(&self, version: &str, parsed: &ParsedReference) -> Vec<Verse> {
        let registry = &self.inner.registry;
        let config = registry.resolve(version);

        // Fast path: the common case is a healthy configured source, worth
        // exactly one round trip without building the rest of the chain.
        if let Some(source) = self.source_for(config.source) {
            if let Some(verses) = self.attempt(source, &config.provider_id, parsed).await {
                if !verses.is_empty() {
                    return verses;
                }
            }
        }

        for tag in FALLBACK_ORDER {
            if tag == config.source {
                continue;
            }
            let provider_id = match tag {
                VerseSource::ApiBible => registry.api_bible_id(version),
                VerseSource::Nlt => match registry.nlt_id(version) {
                    Some(id) => id.to_string(),
                    // The alternate licensed source carries no id for this
                    // version; skip it.
                    None => continue,
                },
                VerseSource::BibleApi => registry.short_code(version).to_string(),
                VerseSource::Esv | VerseSource::Local => String::new(),
            };

            let Some(source) = self.source_for(tag) else {
                continue;
            };
            debug!(version, source = %tag, "falling back to next source");
            if let Some(verses) = self.attempt(source, &provider_id, parsed).await {
                if !verses.is_empty() {
                    return verses;
                }
            }
        }

        Vec::new()
    }

    /// One attempt against one source. `None` means the source failed (the
    /// error is logged here and swallowed); `Some(vec![])` means it
    /// responded with no matching text. Both move the chain along.
    async fn attempt(
        &self,
        source: &std::sync::Arc<dyn PassageSource>,
        provider_id: &str,
        parsed: &ParsedReference,
    ) -> Option<Vec<Verse>> {
        let result = if parsed.is_cross_chapter_verse_range() {
            self.fetch_decomposed(source, provider_id, parsed).await
        } else {
            source.fetch_passage(provider_id, parsed).await
        };

        match result {
            Ok(verses) => Some(verses),
            Err(err) => {
                warn!(source = %source.source(), %err, "source fetch failed");
                None
            }
        }
    }

    /// Decomposes a cross-chapter verse range into one whole-chapter fetch
    /// per chapter, then trims the concatenation to the requested bounds.
    ///
    /// No source supports these ranges in a single call, so the
    /// decomposition lives here rather than in any adapter. Duplicate
    /// verses and verse-0 superscription lines some providers emit across
    /// chapter boundaries are dropped, first occurrence winning.
    async fn fetch_decomposed(
        &self,
        source: &std::sync::Arc<dyn PassageSource>,
        provider_id: &str,
        parsed: &ParsedReference,
    ) -> Result<Vec<Verse>, crate::error::SourceError> {
        let mut verses = Vec::new();
        for chapter in parsed.chapters() {
            let whole = ParsedReference::whole_chapter(parsed.book.clone(), chapter);
            verses.extend(source.fetch_passage(provider_id, &whole).await?);
        }

        verses.retain(|v| v.verse > 0 && parsed.contains(v.chapter, v.verse));

        let mut seen = std::collections::HashSet::new();
        verses.retain(|v| seen.insert((v.chapter, v.verse)));

        Ok(verses)
    }
}
