//! Error types

mod parse;
mod source;

pub use parse::*;
pub use source::*;

/// Top-level error type for the library.
///
/// Only caller bugs (an empty reference string, a broken store path) surface
/// through this type; environmental failures inside the fallback chain are
/// swallowed at the orchestrator and logged there.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The reference string did not match the citation grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A source adapter failed outside of the fallback chain (e.g. a direct
    /// single-source fetch).
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The cache or local store backend failed to open.
    #[error("Store error: {0}")]
    Store(#[from] async_sqlite::Error),

    /// The caller passed an unusable argument, e.g. an empty reference.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}
