//! Local verse store.
//!
//! The application's own verse table, queried with three orthogonal
//! filters: book display name (case-insensitive partial match), chapter
//! (equality or range), verse (range or open lower bound), ordered by
//! chapter then verse. No network dependency, so it is both the ultimate
//! fallback of the chain and the preferred source for offline-oriented
//! callers.

use std::path::Path;

use async_sqlite::rusqlite;
use async_sqlite::rusqlite::types::Value as SqlValue;
use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_sqlite::JournalMode;
use async_trait::async_trait;

use super::PassageSource;
use crate::error::SourceError;
use crate::model::ParsedReference;
use crate::model::Verse;
use crate::model::VerseSource;

/// Source adapter over the local `verses` table.
pub struct LocalSource {
    client: Client,
}

impl LocalSource {
    /// Opens the verse store at the specified path.
    ///
    /// Creates the table if it doesn't exist; populating it is an external
    /// ingestion concern.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, async_sqlite::Error> {
        let client = ClientBuilder::new()
            .path(path)
            .journal_mode(JournalMode::Wal)
            .open()
            .await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    /// Opens an in-memory verse store, for tests.
    pub async fn open_in_memory() -> Result<Self, async_sqlite::Error> {
        let client = ClientBuilder::new().path(":memory:").open().await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    async fn init_schema(client: &Client) -> Result<(), async_sqlite::Error> {
        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS verses (
                        book TEXT NOT NULL,
                        chapter INTEGER NOT NULL,
                        verse INTEGER NOT NULL,
                        text TEXT NOT NULL,
                        PRIMARY KEY (book, chapter, verse)
                    )",
                    [],
                )?;
                Ok(())
            })
            .await
    }

    /// Inserts verses for one book chapter, replacing existing rows.
    pub async fn insert_verses(
        &self,
        book: impl Into<String>,
        chapter: u32,
        verses: Vec<(u32, String)>,
    ) -> Result<(), async_sqlite::Error> {
        let book = book.into();
        self.client
            .conn(move |conn| {
                let mut stmt = conn.prepare(
                    "INSERT OR REPLACE INTO verses (book, chapter, verse, text)
                     VALUES (?, ?, ?, ?)",
                )?;
                for (verse, text) in &verses {
                    stmt.execute(rusqlite::params![book, chapter, verse, text])?;
                }
                Ok(())
            })
            .await
    }

    /// Best-effort resolution of a reference string the strict parser
    /// rejected.
    ///
    /// Sanitizes the input (strips punctuation the grammar chokes on,
    /// collapses whitespace) and re-matches it loosely; a match becomes a
    /// normal store query, anything else is an empty result. This is the
    /// fall-through path for ParseError at the orchestrator.
    pub async fn search_raw(&self, reference: &str) -> Result<Vec<Verse>, SourceError> {
        match loose_parse(reference) {
            Some(parsed) => self.query(&parsed).await,
            None => Ok(Vec::new()),
        }
    }

    /// Runs the three-filter query for a parsed reference.
    async fn query(&self, reference: &ParsedReference) -> Result<Vec<Verse>, SourceError> {
        let mut sql = String::from(
            "SELECT chapter, verse, text FROM verses WHERE book LIKE '%' || ? || '%'",
        );
        let mut params: Vec<SqlValue> = vec![SqlValue::Text(reference.book.clone())];

        match reference.end_chapter {
            Some(end) if end > reference.start_chapter => {
                sql.push_str(" AND chapter >= ? AND chapter <= ?");
                params.push(SqlValue::Integer(reference.start_chapter as i64));
                params.push(SqlValue::Integer(end as i64));
            }
            _ => {
                sql.push_str(" AND chapter = ?");
                params.push(SqlValue::Integer(reference.start_chapter as i64));
            }
        }

        if let Some(start_verse) = reference.start_verse {
            sql.push_str(" AND verse >= ?");
            params.push(SqlValue::Integer(start_verse as i64));
        }
        if let Some(end_verse) = reference.end_verse {
            sql.push_str(" AND verse <= ?");
            params.push(SqlValue::Integer(end_verse as i64));
        }

        sql.push_str(" ORDER BY chapter, verse");

        let rows = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(params), |row| {
                        Ok(Verse::new(
                            row.get::<_, i64>(0)? as u32,
                            row.get::<_, i64>(1)? as u32,
                            row.get::<_, String>(2)?,
                        ))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;

        Ok(rows)
    }
}

/// Permissive re-match for strings the strict grammar rejects: keep only
/// letters, digits, spaces, `:` and `-`, then take the trailing numeric part
/// as `C[:V[-V]]` and everything before it as the book. No numeric tail, or
/// a tail that still will not parse, means no match - a book alone is never
/// expanded into whole-book output.
fn loose_parse(reference: &str) -> Option<ParsedReference> {
    let cleaned: String = reference
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ':' || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    let tail_start = cleaned
        .rfind(|c: char| !c.is_ascii_digit() && c != ':' && c != '-' && c != ' ')?;
    let tail_start = tail_start + cleaned[tail_start..].chars().next()?.len_utf8();
    let tail: String = cleaned[tail_start..]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let book = cleaned[..tail_start].trim();
    if book.is_empty() || !tail.contains(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let mut dash = tail.splitn(2, '-');
    let left = dash.next()?;
    let right = dash.next();

    let mut left_parts = left.splitn(2, ':');
    let start_chapter: u32 = left_parts.next()?.parse().ok()?;
    let start_verse: Option<u32> = left_parts.next().and_then(|v| v.parse().ok());
    if start_chapter == 0 {
        return None;
    }

    let end: Option<u32> = right.and_then(|r| r.rsplit(':').next()?.parse().ok());

    let (end_chapter, end_verse) = match (start_verse, end) {
        (Some(_), Some(e)) => (None, Some(e)),
        (None, Some(e)) => (Some(e), None),
        (Some(v), None) => (None, Some(v)),
        (None, None) => (None, None),
    };

    Some(ParsedReference {
        book: book.to_string(),
        start_chapter,
        end_chapter,
        start_verse,
        end_verse,
    })
}

#[async_trait]
impl PassageSource for LocalSource {
    fn source(&self) -> VerseSource {
        VerseSource::Local
    }

    async fn fetch_passage(
        &self,
        _provider_id: &str,
        reference: &ParsedReference,
    ) -> Result<Vec<Verse>, SourceError> {
        self.query(reference).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fixture_store() -> LocalSource {
        let store = LocalSource::open_in_memory().await.unwrap();
        store
            .insert_verses(
                "John",
                3,
                (14..=18)
                    .map(|v| (v, format!("John 3:{v} text")))
                    .collect(),
            )
            .await
            .unwrap();
        store
            .insert_verses("John", 4, vec![(1, "John 4:1 text".to_string())])
            .await
            .unwrap();
        store
            .insert_verses("1 Samuel", 17, vec![(4, "Goliath verse".to_string())])
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_partial_case_insensitive_book_match() {
        let store = fixture_store().await;
        let reference = ParsedReference {
            book: "joh".to_string(),
            start_chapter: 3,
            end_chapter: None,
            start_verse: Some(16),
            end_verse: Some(16),
        };
        let verses = store.fetch_passage("", &reference).await.unwrap();
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].verse, 16);
    }

    #[tokio::test]
    async fn test_open_ended_verse_range() {
        let store = fixture_store().await;
        let reference = ParsedReference {
            book: "John".to_string(),
            start_chapter: 3,
            end_chapter: None,
            start_verse: Some(16),
            end_verse: None,
        };
        let verses = store.fetch_passage("", &reference).await.unwrap();
        let numbers: Vec<u32> = verses.iter().map(|v| v.verse).collect();
        assert_eq!(numbers, vec![16, 17, 18]);
    }

    #[tokio::test]
    async fn test_chapter_range_ordering() {
        let store = fixture_store().await;
        let reference = ParsedReference {
            book: "John".to_string(),
            start_chapter: 3,
            end_chapter: Some(4),
            start_verse: None,
            end_verse: None,
        };
        let verses = store.fetch_passage("", &reference).await.unwrap();
        assert_eq!(verses.len(), 6);
        assert_eq!((verses[0].chapter, verses[0].verse), (3, 14));
        assert_eq!((verses[5].chapter, verses[5].verse), (4, 1));
    }

    #[tokio::test]
    async fn test_search_raw_tolerates_punctuation() {
        let store = fixture_store().await;
        let verses = store.search_raw("John 3:16.").await.unwrap();
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].verse, 16);
    }

    #[tokio::test]
    async fn test_search_raw_placeholder_comes_back_empty() {
        let store = fixture_store().await;
        let verses = store.search_raw("Scripture for Day 4").await.unwrap();
        assert!(verses.is_empty());

        let verses = store.search_raw("no numbers here").await.unwrap();
        assert!(verses.is_empty());
    }

    #[test]
    fn test_loose_parse_shapes() {
        let parsed = loose_parse("John 3:16-18!").unwrap();
        assert_eq!(parsed.start_chapter, 3);
        assert_eq!(parsed.start_verse, Some(16));
        assert_eq!(parsed.end_verse, Some(18));

        let parsed = loose_parse("Genesis 1-3").unwrap();
        assert_eq!(parsed.end_chapter, Some(3));

        assert!(loose_parse("Malachi").is_none());
        assert!(loose_parse("").is_none());
    }
}
