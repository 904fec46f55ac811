//! Upstream text sources.
//!
//! One adapter per provider, each translating the uniform fetch contract
//! into that provider's protocol. Per-provider response quirks (bracketed
//! plain text, structured content blocks, JSON verse arrays, SQL rows) stay
//! inside the adapter; everything returns the shared `Vec<Verse>` shape.

mod api_bible;
mod bible_api;
mod bracketed;
mod esv;
mod local;
mod nlt;

pub use api_bible::*;
pub use bible_api::*;
pub use bracketed::*;
pub use esv::*;
pub use local::*;
pub use nlt::*;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::ParsedReference;
use crate::model::Verse;
use crate::model::VerseSource;

/// Trait for upstream verse sources.
///
/// `Ok(vec![])` means the provider responded successfully but has no
/// matching text - a legitimate "try the next source" signal, distinct from
/// `Err`, which is a harder failure the fallback chain also skips past.
/// Callers of the orchestrator only ever see the aggregate outcome.
///
/// Cross-chapter verse ranges are never passed to a source; the
/// orchestration layer decomposes them into one whole-chapter call per
/// chapter first.
#[async_trait]
pub trait PassageSource: Send + Sync {
    /// Which provider this source talks to.
    fn source(&self) -> VerseSource;

    /// Fetches the verses for a reference from this provider.
    ///
    /// `provider_id` is the provider-specific version identifier resolved by
    /// the registry (an API.Bible bible id, an NLT translation id, a
    /// bible-api.com short-code, ...).
    async fn fetch_passage(
        &self,
        provider_id: &str,
        reference: &ParsedReference,
    ) -> Result<Vec<Verse>, SourceError>;
}
