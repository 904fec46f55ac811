//! Version registry and provider catalog.
//!
//! The catalog is curated, immutable configuration data injected at
//! construction time: the version list, the abbreviation-to-provider map,
//! the book-name alias table used by API.Bible book matching, and the
//! bible-api.com translation short-code remap. Tests substitute fixture
//! catalogs the same way.

use std::collections::HashMap;

use crate::model::BibleVersion;
use crate::model::VerseSource;

/// API.Bible identifier for the King James Version, the default bible used
/// when an abbreviation is unknown.
pub const DEFAULT_API_BIBLE_ID: &str = "de4e12af7f28f599-02";

/// Where a version's text is fetched from, resolved from its abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// The primary source to try first.
    pub source: VerseSource,
    /// The provider-specific identifier to pass to that source.
    pub provider_id: String,
}

/// Immutable provider configuration data.
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    versions: Vec<BibleVersion>,
    /// lowercase abbreviation -> NLT API translation id, for versions the
    /// alternate licensed source can serve.
    nlt_ids: HashMap<String, String>,
    /// lowercase abbreviation -> bible-api.com translation short-code.
    short_codes: HashMap<String, String>,
    /// lowercase book name or alias -> USFM-style book code.
    book_codes: HashMap<String, &'static str>,
}

impl Default for ProviderCatalog {
    fn default() -> Self {
        let versions = vec![
            BibleVersion::new("esv", "English Standard Version", "ESV", "en", VerseSource::Esv),
            BibleVersion::new(DEFAULT_API_BIBLE_ID, "King James Version", "KJV", "en", VerseSource::ApiBible),
            BibleVersion::new("06125adad2d5898a-01", "American Standard Version", "ASV", "en", VerseSource::ApiBible),
            BibleVersion::new("9879dbb7cfe39e4d-04", "World English Bible", "WEB", "en", VerseSource::ApiBible),
            BibleVersion::new("NLT", "New Living Translation", "NLT", "en", VerseSource::Nlt),
            BibleVersion::new("darby", "Darby Translation", "DARBY", "en", VerseSource::BibleApi),
            BibleVersion::new("ylt", "Young's Literal Translation", "YLT", "en", VerseSource::BibleApi),
        ];

        let nlt_ids = [("nlt", "NLT"), ("kjv", "KJV")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        // Most abbreviations collapse to "kjv": bible-api.com is the
        // last-resort generic source, not a faithful rendering of every
        // translation.
        let short_codes = [
            ("kjv", "kjv"),
            ("asv", "asv"),
            ("web", "web"),
            ("darby", "darby"),
            ("ylt", "ylt"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            versions,
            nlt_ids,
            short_codes,
            book_codes: default_book_codes(),
        }
    }
}

impl ProviderCatalog {
    /// Creates the default curated catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the version list.
    pub fn with_versions(mut self, versions: Vec<BibleVersion>) -> Self {
        self.versions = versions;
        self
    }
}

/// Resolves human-facing version abbreviations to provider configuration.
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    catalog: ProviderCatalog,
}

impl VersionRegistry {
    /// Creates a registry over the given catalog.
    pub fn new(catalog: ProviderCatalog) -> Self {
        Self { catalog }
    }

    /// The curated version list.
    pub fn versions(&self) -> &[BibleVersion] {
        &self.catalog.versions
    }

    /// Resolves an abbreviation to its primary source and provider id.
    ///
    /// Unknown abbreviations resolve to the general-purpose provider
    /// (API.Bible, KJV) rather than failing, so a caller always gets some
    /// source to try.
    pub fn resolve(&self, abbreviation: &str) -> ProviderConfig {
        let needle = abbreviation.trim();
        self.catalog
            .versions
            .iter()
            .find(|v| v.abbreviation.eq_ignore_ascii_case(needle))
            .map(|v| ProviderConfig {
                source: v.source,
                provider_id: v.id.clone(),
            })
            .unwrap_or_else(|| ProviderConfig {
                source: VerseSource::ApiBible,
                provider_id: DEFAULT_API_BIBLE_ID.to_string(),
            })
    }

    /// The API.Bible id to use for an abbreviation inside the fallback
    /// chain: the version's own id when it is an API.Bible version, the
    /// default bible otherwise.
    pub fn api_bible_id(&self, abbreviation: &str) -> String {
        let config = self.resolve(abbreviation);
        if config.source == VerseSource::ApiBible {
            config.provider_id
        } else {
            DEFAULT_API_BIBLE_ID.to_string()
        }
    }

    /// The NLT API translation id for an abbreviation, when the alternate
    /// licensed source is configured for that version.
    pub fn nlt_id(&self, abbreviation: &str) -> Option<&str> {
        self.catalog
            .nlt_ids
            .get(&abbreviation.trim().to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The bible-api.com translation short-code for an abbreviation.
    /// Abbreviations without a mapping collapse to `"kjv"`.
    pub fn short_code(&self, abbreviation: &str) -> &str {
        self.catalog
            .short_codes
            .get(&abbreviation.trim().to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or("kjv")
    }

    /// Looks up the USFM-style book code for a book name or alias.
    pub fn book_code(&self, book: &str) -> Option<&'static str> {
        self.catalog
            .book_codes
            .get(&book.trim().to_ascii_lowercase())
            .copied()
    }
}

/// The book-name alias table: canonical names plus common variants, mapped
/// to USFM-style three-letter codes (the scheme API.Bible keys books on).
fn default_book_codes() -> HashMap<String, &'static str> {
    let entries: &[(&str, &'static str)] = &[
        ("genesis", "GEN"),
        ("exodus", "EXO"),
        ("leviticus", "LEV"),
        ("numbers", "NUM"),
        ("deuteronomy", "DEU"),
        ("joshua", "JOS"),
        ("judges", "JDG"),
        ("ruth", "RUT"),
        ("1 samuel", "1SA"),
        ("2 samuel", "2SA"),
        ("1 kings", "1KI"),
        ("2 kings", "2KI"),
        ("1 chronicles", "1CH"),
        ("2 chronicles", "2CH"),
        ("ezra", "EZR"),
        ("nehemiah", "NEH"),
        ("esther", "EST"),
        ("job", "JOB"),
        ("psalm", "PSA"),
        ("psalms", "PSA"),
        ("proverbs", "PRO"),
        ("ecclesiastes", "ECC"),
        ("song of solomon", "SNG"),
        ("song of songs", "SNG"),
        ("isaiah", "ISA"),
        ("jeremiah", "JER"),
        ("lamentations", "LAM"),
        ("ezekiel", "EZK"),
        ("daniel", "DAN"),
        ("hosea", "HOS"),
        ("joel", "JOL"),
        ("amos", "AMO"),
        ("obadiah", "OBA"),
        ("jonah", "JON"),
        ("micah", "MIC"),
        ("nahum", "NAM"),
        ("habakkuk", "HAB"),
        ("zephaniah", "ZEP"),
        ("haggai", "HAG"),
        ("zechariah", "ZEC"),
        ("malachi", "MAL"),
        ("matthew", "MAT"),
        ("mark", "MRK"),
        ("luke", "LUK"),
        ("john", "JHN"),
        ("acts", "ACT"),
        ("romans", "ROM"),
        ("1 corinthians", "1CO"),
        ("2 corinthians", "2CO"),
        ("galatians", "GAL"),
        ("ephesians", "EPH"),
        ("philippians", "PHP"),
        ("colossians", "COL"),
        ("1 thessalonians", "1TH"),
        ("2 thessalonians", "2TH"),
        ("1 timothy", "1TI"),
        ("2 timothy", "2TI"),
        ("titus", "TIT"),
        ("philemon", "PHM"),
        ("hebrews", "HEB"),
        ("james", "JAS"),
        ("1 peter", "1PE"),
        ("2 peter", "2PE"),
        ("1 john", "1JN"),
        ("2 john", "2JN"),
        ("3 john", "3JN"),
        ("jude", "JUD"),
        ("revelation", "REV"),
    ];

    entries
        .iter()
        .map(|(name, code)| (name.to_string(), *code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_versions() {
        let registry = VersionRegistry::new(ProviderCatalog::default());

        let esv = registry.resolve("ESV");
        assert_eq!(esv.source, VerseSource::Esv);
        assert_eq!(esv.provider_id, "esv");

        let kjv = registry.resolve("kjv");
        assert_eq!(kjv.source, VerseSource::ApiBible);
        assert_eq!(kjv.provider_id, DEFAULT_API_BIBLE_ID);
    }

    #[test]
    fn test_unknown_abbreviation_defaults_to_general_provider() {
        let registry = VersionRegistry::new(ProviderCatalog::default());

        let unknown = registry.resolve("XYZ");
        assert_eq!(unknown.source, VerseSource::ApiBible);
        assert_eq!(unknown.provider_id, DEFAULT_API_BIBLE_ID);
    }

    #[test]
    fn test_nlt_id_only_for_configured_versions() {
        let registry = VersionRegistry::new(ProviderCatalog::default());

        assert_eq!(registry.nlt_id("NLT"), Some("NLT"));
        assert_eq!(registry.nlt_id("KJV"), Some("KJV"));
        assert_eq!(registry.nlt_id("ESV"), None);
    }

    #[test]
    fn test_short_code_collapses_to_kjv() {
        let registry = VersionRegistry::new(ProviderCatalog::default());

        assert_eq!(registry.short_code("WEB"), "web");
        assert_eq!(registry.short_code("ESV"), "kjv");
        assert_eq!(registry.short_code("NIV"), "kjv");
    }

    #[test]
    fn test_book_codes_and_aliases() {
        let registry = VersionRegistry::new(ProviderCatalog::default());

        assert_eq!(registry.book_code("Genesis"), Some("GEN"));
        assert_eq!(registry.book_code("1 Samuel"), Some("1SA"));
        assert_eq!(registry.book_code("Psalm"), Some("PSA"));
        assert_eq!(registry.book_code("Psalms"), Some("PSA"));
        assert_eq!(registry.book_code("Song of Songs"), Some("SNG"));
        assert_eq!(registry.book_code("Narnia"), None);
    }
}
