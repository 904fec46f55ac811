//! Bracketed-verse-number text parsing.
//!
//! The licensed-text providers (ESV, NLT) return passages as flat text with
//! verse numbers in square brackets:
//!
//! ```text
//! [1] In the beginning, God created the heavens and the earth. [2] The
//! earth was without form and void...
//! ```
//!
//! Reconstruction carries a chapter/verse cursor line by line: un-bracketed
//! continuation lines are appended to the previous verse's text, and a
//! bracketed number at or below the running verse number signals the next
//! chapter (verse numbering restarts at 1 when a multi-chapter passage
//! crosses a chapter boundary).

use crate::model::Verse;

/// Parses a bracketed-verse-number text body into verses, starting the
/// chapter cursor at `start_chapter`.
pub fn parse_bracketed_text(body: &str, start_chapter: u32) -> Vec<Verse> {
    let mut verses: Vec<Verse> = Vec::new();
    let mut chapter = start_chapter;
    let mut last_verse = 0u32;

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let segments = split_bracketed(line);
        if segments.is_empty() {
            // Continuation of the previous verse. Text before the first
            // verse marker (passage echoes, headings) has no verse to attach
            // to and is dropped.
            if let Some(current) = verses.last_mut() {
                if !current.text.is_empty() {
                    current.text.push(' ');
                }
                current.text.push_str(line);
            }
            continue;
        }

        for (number, text) in segments {
            if number <= last_verse {
                chapter += 1;
            }
            last_verse = number;
            verses.push(Verse::new(chapter, number, text));
        }
    }

    verses
}

/// Splits a line into `(verse_number, text)` segments at `[N]` markers.
///
/// Returns an empty vec when the line carries no marker at all.
fn split_bracketed(line: &str) -> Vec<(u32, String)> {
    let mut segments = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find('[') {
        let Some(close_rel) = rest[open..].find(']') else {
            break;
        };
        let close = open + close_rel;
        let Ok(number) = rest[open + 1..close].trim().parse::<u32>() else {
            // Not a verse marker (e.g. a footnote tag); skip past it.
            rest = &rest[close + 1..];
            continue;
        };

        let after = &rest[close + 1..];
        let text_end = find_next_marker(after).unwrap_or(after.len());
        let text = after[..text_end].trim().to_string();
        segments.push((number, text));
        rest = &after[text_end..];
    }

    segments
}

/// Finds the byte offset of the next numeric `[N]` marker in `s`.
fn find_next_marker(s: &str) -> Option<usize> {
    let mut search_from = 0;
    while let Some(open_rel) = s[search_from..].find('[') {
        let open = search_from + open_rel;
        if let Some(close_rel) = s[open..].find(']') {
            let close = open + close_rel;
            if s[open + 1..close].trim().parse::<u32>().is_ok() {
                return Some(open);
            }
            search_from = close + 1;
        } else {
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_verse() {
        let verses = parse_bracketed_text("[16] For God so loved the world.", 3);
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0], Verse::new(3, 16, "For God so loved the world."));
    }

    #[test]
    fn test_multiple_markers_on_one_line() {
        let verses = parse_bracketed_text("[1] First words. [2] Second words.", 1);
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].verse, 1);
        assert_eq!(verses[0].text, "First words.");
        assert_eq!(verses[1].verse, 2);
        assert_eq!(verses[1].text, "Second words.");
    }

    #[test]
    fn test_continuation_lines_append_to_previous_verse() {
        let body = "[4] The voice of one crying in the wilderness:\nPrepare the way of the Lord,\nmake his paths straight.";
        let verses = parse_bracketed_text(body, 3);
        assert_eq!(verses.len(), 1);
        assert_eq!(
            verses[0].text,
            "The voice of one crying in the wilderness: Prepare the way of the Lord, make his paths straight."
        );
    }

    #[test]
    fn test_chapter_advances_when_numbering_restarts() {
        let body = "[30] Last verse of chapter one.\n[1] First verse of chapter two.\n[2] And the next.";
        let verses = parse_bracketed_text(body, 1);
        assert_eq!(verses.len(), 3);
        assert_eq!((verses[0].chapter, verses[0].verse), (1, 30));
        assert_eq!((verses[1].chapter, verses[1].verse), (2, 1));
        assert_eq!((verses[2].chapter, verses[2].verse), (2, 2));
    }

    #[test]
    fn test_leading_heading_is_dropped() {
        let body = "John 3:16\n\n[16] For God so loved the world.";
        let verses = parse_bracketed_text(body, 3);
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].verse, 16);
    }

    #[test]
    fn test_non_numeric_brackets_ignored() {
        let verses = parse_bracketed_text("[1] In the beginning[a] was the Word.", 1);
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].text, "In the beginning[a] was the Word.");
    }
}
