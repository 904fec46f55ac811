//! Parsed scripture reference

use std::fmt;
use std::ops::RangeInclusive;

/// A structured scripture reference produced by [`crate::reference::parse`].
///
/// The book name is free text matched case-insensitively downstream; it is
/// deliberately not resolved to a canonical book ID at parse time, since each
/// provider uses its own book-ID scheme.
///
/// # Invariants
///
/// - `start_chapter >= 1`
/// - if `end_chapter` is set, it is `>= start_chapter`
/// - if `start_verse` is set without `end_verse`, the range is open-ended
///   ("verse N to the end of the chapter")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    /// The book name as written, e.g. `"1 Samuel"`.
    pub book: String,
    /// First chapter of the range.
    pub start_chapter: u32,
    /// Last chapter of the range, when the reference spans chapters.
    pub end_chapter: Option<u32>,
    /// First verse of the range, when the reference names verses.
    pub start_verse: Option<u32>,
    /// Last verse of the range.
    pub end_verse: Option<u32>,
}

impl ParsedReference {
    /// Creates a reference covering one whole chapter.
    pub fn whole_chapter(book: impl Into<String>, chapter: u32) -> Self {
        Self {
            book: book.into(),
            start_chapter: chapter,
            end_chapter: None,
            start_verse: None,
            end_verse: None,
        }
    }

    /// The last chapter of the range (equal to `start_chapter` for
    /// single-chapter references).
    pub fn last_chapter(&self) -> u32 {
        self.end_chapter.unwrap_or(self.start_chapter)
    }

    /// Iterates the chapter span, inclusive.
    pub fn chapters(&self) -> RangeInclusive<u32> {
        self.start_chapter..=self.last_chapter()
    }

    /// Returns `true` if the reference spans more than one chapter while
    /// naming verses, i.e. a `Book C1:V1-C2:V2` citation. These cannot be
    /// satisfied by a single source call and are decomposed into per-chapter
    /// fetches by the orchestration layer.
    pub fn is_cross_chapter_verse_range(&self) -> bool {
        self.last_chapter() > self.start_chapter
            && (self.start_verse.is_some() || self.end_verse.is_some())
    }

    /// Returns `true` if `verse` in `chapter` falls inside this range.
    pub fn contains(&self, chapter: u32, verse: u32) -> bool {
        if chapter < self.start_chapter || chapter > self.last_chapter() {
            return false;
        }
        if chapter == self.start_chapter {
            if let Some(start) = self.start_verse {
                if verse < start {
                    return false;
                }
            }
        }
        if chapter == self.last_chapter() {
            if let Some(end) = self.end_verse {
                if verse > end {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for ParsedReference {
    /// Formats the reference as a canonical citation string, e.g.
    /// `"Matthew 5:3-7:29"`, `"Genesis 1-3"`, `"John 3:16"`, `"Psalm 23"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book, self.start_chapter)?;

        match (self.start_verse, self.end_verse, self.end_chapter) {
            // Cross-chapter verse range: Book C1:V1-C2:V2
            (Some(sv), Some(ev), Some(ec)) if ec > self.start_chapter => {
                write!(f, ":{}-{}:{}", sv, ec, ev)
            }
            // Chapter range: Book C1-C2
            (None, None, Some(ec)) if ec > self.start_chapter => write!(f, "-{}", ec),
            // Verse range within one chapter: Book C:V1-V2
            (Some(sv), Some(ev), _) if ev > sv => write!(f, ":{}-{}", sv, ev),
            // Single verse or open-ended lower bound: Book C:V
            (Some(sv), _, _) => write!(f, ":{}", sv),
            _ => Ok(()),
        }
    }
}
