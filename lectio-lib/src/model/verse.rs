//! Verse model

use serde::Deserialize;
use serde::Serialize;

/// A single verse of scripture as returned by a source.
///
/// Verse numbers are 1-based and monotonically increasing within a chapter,
/// but callers must not assume contiguity: a source may drop verses its
/// provider lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// The chapter the verse belongs to.
    pub chapter: u32,
    /// The 1-based verse number within the chapter.
    pub verse: u32,
    /// The verse text.
    pub text: String,
}

impl Verse {
    /// Creates a new verse.
    pub fn new(chapter: u32, verse: u32, text: impl Into<String>) -> Self {
        Self {
            chapter,
            verse,
            text: text.into(),
        }
    }
}
