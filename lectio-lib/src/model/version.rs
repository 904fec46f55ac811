//! Bible version catalog types

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// The upstream source a version's text is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerseSource {
    /// The ESV API (api.esv.org) - licensed text, bracketed plain-text body.
    Esv,
    /// API.Bible (scripture.api.bible) - general-purpose structured provider.
    ApiBible,
    /// The NLT API (api.nlt.to) - alternate licensed text source.
    Nlt,
    /// bible-api.com - keyless last-resort generic source.
    BibleApi,
    /// The application's own verse table.
    Local,
}

impl fmt::Display for VerseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Esv => "ESV API",
            Self::ApiBible => "API.Bible",
            Self::Nlt => "NLT API",
            Self::BibleApi => "bible-api.com",
            Self::Local => "local store",
        };
        f.write_str(name)
    }
}

/// A Bible translation the client can resolve passages against.
///
/// Versions are curated catalog data: fetched once per cache TTL window and
/// otherwise treated as read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleVersion {
    /// Provider-specific identifier (may equal `abbreviation` for sources
    /// that key on the abbreviation itself).
    pub id: String,
    /// Full display name, e.g. `"King James Version"`.
    pub name: String,
    /// User-facing key, e.g. `"KJV"`.
    pub abbreviation: String,
    /// ISO language code, e.g. `"en"`.
    pub language: String,
    /// The source this version's text comes from.
    pub source: VerseSource,
}

impl BibleVersion {
    /// Creates a new catalog entry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        language: impl Into<String>,
        source: VerseSource,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            abbreviation: abbreviation.into(),
            language: language.into(),
            source,
        }
    }
}
