//! Source adapter errors

use crate::model::VerseSource;

/// Errors that can occur while fetching from one upstream source.
///
/// Inside the fallback chain these are caught, logged, and converted into
/// "try the next source"; they are never surfaced to callers of the
/// orchestrator. A source returning successfully with no matching verses is
/// *not* an error - it yields `Ok(vec![])`.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source was constructed without the credentials it requires.
    ///
    /// An unconfigured source is treated as always-failing rather than a
    /// crash, so a deployment missing one API key degrades to the rest of
    /// the chain.
    #[error("{verse_source} is not configured (missing API key)")]
    NotConfigured {
        /// The unconfigured source.
        verse_source: VerseSource,
    },

    /// Non-2xx HTTP response from the provider.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Network-level failure reaching the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Local verse store query failure.
    #[error("Verse store error: {0}")]
    Store(#[from] async_sqlite::Error),

    /// The provider responded but the body could not be interpreted.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },
}

impl SourceError {
    /// Creates an HTTP error from a status code and body.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a response parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
