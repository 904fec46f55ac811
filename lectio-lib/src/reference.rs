//! Scripture citation parsing.
//!
//! Turns a human-written citation ("John 3:16", "Genesis 1-3",
//! "Matthew 5:3-7:29") into a [`ParsedReference`]. Four citation forms are
//! supported, tried in precedence order:
//!
//! 1. Cross-chapter verse range: `Book C1:V1-C2:V2`
//! 2. Chapter range: `Book C1-C2`
//! 3. Verse range or single verse: `Book C:V1-V2`, `Book C:V`
//! 4. Whole chapter: `Book C`
//!
//! Book names may contain digits and spaces ("1 Samuel", "2 Corinthians")
//! and are not canonicalized here; each source resolves the name against its
//! own book-ID scheme.

use crate::error::ParseError;
use crate::model::ParsedReference;

/// Parses a citation string into a [`ParsedReference`].
///
/// Failure to match any form is terminal: no partial result is returned. A
/// book name with no numbers at all ("Scripture for Day 4" has numbers;
/// "Malachi" does not) fails with [`ParseError::MissingChapter`] rather than
/// defaulting to chapter 1.
///
/// # Example
///
/// ```
/// use lectio_lib::reference::parse;
///
/// let parsed = parse("Romans 8:28-39").unwrap();
/// assert_eq!(parsed.book, "Romans");
/// assert_eq!(parsed.start_chapter, 8);
/// assert_eq!(parsed.start_verse, Some(28));
/// assert_eq!(parsed.end_verse, Some(39));
/// ```
pub fn parse(reference: &str) -> Result<ParsedReference, ParseError> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(ParseError::unrecognized(reference));
    }

    let (book, numeric) = split_numeric_tail(trimmed);
    let book = book.trim();
    if book.is_empty() {
        return Err(ParseError::unrecognized(reference));
    }
    let Some(numeric) = numeric else {
        return Err(ParseError::missing_chapter(reference));
    };
    if !book_shape_ok(book) {
        return Err(ParseError::unrecognized(reference));
    }

    let parsed = parse_numeric_spec(book, &numeric)
        .ok_or_else(|| ParseError::unrecognized(reference))?;

    Ok(parsed)
}

/// Checks that the book part has the shape of a citation's book name:
/// a single word ("Genesis"), an ordinal-prefixed word ("1 Samuel",
/// "2 Corinthians"), or an "of" compound ("Song of Solomon"). Free-form
/// prose ("Scripture for Day") is rejected so placeholder strings fail
/// parsing instead of being sent to providers as a book.
///
/// This is a shape check only; the name is not resolved against any book
/// table here.
fn book_shape_ok(book: &str) -> bool {
    let words: Vec<&str> = book.split_whitespace().collect();
    match words.as_slice() {
        [word] => word.chars().all(char::is_alphabetic),
        [prefix, word] => {
            matches!(*prefix, "1" | "2" | "3" | "I" | "II" | "III")
                && word.chars().all(char::is_alphabetic)
        }
        [first, "of", rest @ ..] => {
            first.chars().all(char::is_alphabetic)
                && !rest.is_empty()
                && rest
                    .iter()
                    .all(|w| w.chars().all(char::is_alphabetic))
        }
        _ => false,
    }
}

/// Splits the trailing numeric specification (`"5:3-7:29"`) from the book
/// part (`"Matthew"`).
///
/// Scans backwards accepting digits, `:`, `-` and spaces, so leading digits
/// in book names ("1 Samuel 2:3") are untouched: the scan stops at the first
/// letter from the end. Returns `None` for the numeric part when the string
/// ends in no digits at all.
fn split_numeric_tail(input: &str) -> (&str, Option<String>) {
    let tail_start = input
        .rfind(|c: char| !c.is_ascii_digit() && c != ':' && c != '-' && !c.is_whitespace())
        .map(|idx| idx + input[idx..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(0);

    let tail = input[tail_start..].trim();
    if tail.is_empty() || !tail.contains(|c: char| c.is_ascii_digit()) {
        return (input, None);
    }

    // Strip interior whitespace so "1 - 3" and "1-3" parse alike.
    let spec: String = tail.chars().filter(|c| !c.is_whitespace()).collect();
    (&input[..tail_start], Some(spec))
}

/// Matches the numeric part of a citation against the four forms.
fn parse_numeric_spec(book: &str, spec: &str) -> Option<ParsedReference> {
    let mut dash = spec.splitn(2, '-');
    let left = dash.next()?;
    let right = dash.next();

    let (start_chapter, left_verse) = parse_chapter_verse(left)?;

    let Some(right) = right else {
        // No dash: single verse (Book C:V) or whole chapter (Book C).
        return Some(ParsedReference {
            book: book.to_string(),
            start_chapter,
            end_chapter: None,
            start_verse: left_verse,
            end_verse: left_verse,
        });
    };

    if right.contains(':') {
        // Cross-chapter verse range: Book C1:V1-C2:V2.
        let start_verse = left_verse?;
        let (end_chapter, end_verse) = parse_chapter_verse(right)?;
        let end_verse = end_verse?;
        if end_chapter < start_chapter {
            return None;
        }
        if end_chapter == start_chapter && end_verse < start_verse {
            return None;
        }
        return Some(ParsedReference {
            book: book.to_string(),
            start_chapter,
            end_chapter: Some(end_chapter),
            start_verse: Some(start_verse),
            end_verse: Some(end_verse),
        });
    }

    let (tail, tail_verse) = parse_chapter_verse(right)?;
    if tail_verse.is_some() {
        return None;
    }

    match left_verse {
        // Verse range within one chapter: Book C:V1-V2.
        Some(start_verse) => {
            let end_verse = tail;
            if end_verse < start_verse {
                return None;
            }
            Some(ParsedReference {
                book: book.to_string(),
                start_chapter,
                end_chapter: None,
                start_verse: Some(start_verse),
                end_verse: Some(end_verse),
            })
        }
        // Chapter range: Book C1-C2.
        None => {
            let end_chapter = tail;
            if end_chapter < start_chapter {
                return None;
            }
            Some(ParsedReference {
                book: book.to_string(),
                start_chapter,
                end_chapter: Some(end_chapter),
                start_verse: None,
                end_verse: None,
            })
        }
    }
}

/// Parses `"C"` or `"C:V"`. Numbers must be >= 1.
fn parse_chapter_verse(part: &str) -> Option<(u32, Option<u32>)> {
    let mut pieces = part.splitn(2, ':');
    let chapter: u32 = pieces.next()?.parse().ok()?;
    if chapter == 0 {
        return None;
    }
    let verse = match pieces.next() {
        Some(v) => {
            let verse: u32 = v.parse().ok()?;
            if verse == 0 {
                return None;
            }
            Some(verse)
        }
        None => None,
    };
    Some((chapter, verse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_chapter() {
        let parsed = parse("Genesis 1").unwrap();
        assert_eq!(parsed.book, "Genesis");
        assert_eq!(parsed.start_chapter, 1);
        assert_eq!(parsed.end_chapter, None);
        assert_eq!(parsed.start_verse, None);
        assert_eq!(parsed.end_verse, None);
    }

    #[test]
    fn test_single_verse() {
        let parsed = parse("John 3:16").unwrap();
        assert_eq!(parsed.book, "John");
        assert_eq!(parsed.start_chapter, 3);
        assert_eq!(parsed.start_verse, Some(16));
        assert_eq!(parsed.end_verse, Some(16));
    }

    #[test]
    fn test_verse_range() {
        let parsed = parse("Romans 8:28-39").unwrap();
        assert_eq!(parsed.start_chapter, 8);
        assert_eq!(parsed.end_chapter, None);
        assert_eq!(parsed.start_verse, Some(28));
        assert_eq!(parsed.end_verse, Some(39));
    }

    #[test]
    fn test_chapter_range() {
        let parsed = parse("Genesis 1-3").unwrap();
        assert_eq!(parsed.start_chapter, 1);
        assert_eq!(parsed.end_chapter, Some(3));
        assert_eq!(parsed.start_verse, None);
    }

    #[test]
    fn test_cross_chapter_verse_range() {
        let parsed = parse("Matthew 5:3-7:29").unwrap();
        assert_eq!(parsed.book, "Matthew");
        assert_eq!(parsed.start_chapter, 5);
        assert_eq!(parsed.end_chapter, Some(7));
        assert_eq!(parsed.start_verse, Some(3));
        assert_eq!(parsed.end_verse, Some(29));
        assert!(parsed.is_cross_chapter_verse_range());
    }

    #[test]
    fn test_numbered_book_names() {
        let parsed = parse("1 Samuel 17").unwrap();
        assert_eq!(parsed.book, "1 Samuel");
        assert_eq!(parsed.start_chapter, 17);

        let parsed = parse("2 Corinthians 5:17-21").unwrap();
        assert_eq!(parsed.book, "2 Corinthians");
        assert_eq!(parsed.start_chapter, 5);
        assert_eq!(parsed.start_verse, Some(17));
        assert_eq!(parsed.end_verse, Some(21));
    }

    #[test]
    fn test_compound_book_names() {
        let parsed = parse("Song of Solomon 2:1").unwrap();
        assert_eq!(parsed.book, "Song of Solomon");
        assert_eq!(parsed.start_chapter, 2);
        assert_eq!(parsed.start_verse, Some(1));
    }

    #[test]
    fn test_spaces_around_dash() {
        let parsed = parse("Genesis 1 - 3").unwrap();
        assert_eq!(parsed.start_chapter, 1);
        assert_eq!(parsed.end_chapter, Some(3));
    }

    #[test]
    fn test_book_only_fails() {
        assert!(matches!(
            parse("Malachi"),
            Err(ParseError::MissingChapter { .. })
        ));
        assert!(matches!(
            parse("1 Samuel"),
            Err(ParseError::MissingChapter { .. })
        ));
    }

    #[test]
    fn test_placeholder_text_fails() {
        assert!(matches!(
            parse("Scripture for Day 4"),
            Err(ParseError::Unrecognized { .. })
        ));
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
        assert!(parse("3:16").is_err());
        assert!(parse("Genesis 0").is_err());
        assert!(parse("John 3:0").is_err());
    }

    #[test]
    fn test_reversed_ranges_fail() {
        assert!(parse("Genesis 3-1").is_err());
        assert!(parse("John 3:16-12").is_err());
        assert!(parse("Matthew 7:29-5:3").is_err());
    }

    #[test]
    fn test_mixed_range_forms_fail() {
        // A colon on only one side of the dash in a chapter-spanning form is
        // not a valid citation.
        assert!(parse("Matthew 5-7:29").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for input in [
            "John 3:16",
            "Romans 8:28-39",
            "Genesis 1-3",
            "Matthew 5:3-7:29",
            "Psalm 23",
            "1 Samuel 17:4",
        ] {
            let first = parse(input).unwrap();
            let reparsed = parse(&first.to_string()).unwrap();
            assert_eq!(first, reparsed, "round trip failed for {input:?}");
        }
    }
}
