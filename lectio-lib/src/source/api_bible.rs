//! API.Bible source (scripture.api.bible).
//!
//! General-purpose structured provider. Fetching is two-step: list the
//! bible's books to map the written book name to a provider book id, then
//! fetch one chapter at a time as structured JSON content and flatten it
//! back into verses. Verse-range filtering is applied client-side after the
//! full chapter is retrieved, never delegated to the provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::PassageSource;
use crate::error::SourceError;
use crate::model::ParsedReference;
use crate::model::Verse;
use crate::model::VerseSource;
use crate::registry::VersionRegistry;

const DEFAULT_BASE_URL: &str = "https://api.scripture.api.bible/v1";

/// Source adapter for API.Bible.
pub struct ApiBibleSource {
    http_client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Option<Duration>,
    /// Used for the book-name alias table when matching provider book ids.
    registry: Arc<VersionRegistry>,
}

impl ApiBibleSource {
    /// Creates a new API.Bible source.
    pub fn new(
        http_client: Client,
        api_key: Option<String>,
        timeout: Option<Duration>,
        registry: Arc<VersionRegistry>,
    ) -> Self {
        Self {
            http_client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
            registry,
        }
    }

    /// Overrides the base URL (for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        api_key: &str,
        url: &str,
    ) -> Result<T, SourceError> {
        let mut request = self.http_client.get(url).header("api-key", api_key);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::http(status, body));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::parse(format!("API.Bible response: {e}")))
    }

    /// Maps the written book name to the provider's book id: by alias code
    /// first, then case-insensitive name equality, then name prefix.
    async fn resolve_book_id(
        &self,
        api_key: &str,
        bible_id: &str,
        book: &str,
    ) -> Result<Option<String>, SourceError> {
        let url = format!("{}/bibles/{}/books", self.base_url, bible_id);
        let books: BooksResponse = self.get_json(api_key, &url).await?;

        let alias_code = self.registry.book_code(book);
        let found = books.data.iter().find(|b| {
            alias_code.is_some_and(|code| b.id.eq_ignore_ascii_case(code))
                || b.name.eq_ignore_ascii_case(book)
                || b.name.to_ascii_lowercase().starts_with(&book.to_ascii_lowercase())
        });

        Ok(found.map(|b| b.id.clone()))
    }

    async fn fetch_chapter(
        &self,
        api_key: &str,
        bible_id: &str,
        book_id: &str,
        chapter: u32,
    ) -> Result<Vec<Verse>, SourceError> {
        let url = format!(
            "{}/bibles/{}/chapters/{}.{}?content-type=json&include-verse-spans=false",
            self.base_url, bible_id, book_id, chapter
        );
        let response: ChapterResponse = self.get_json(api_key, &url).await?;

        let mut verses = Vec::new();
        let mut current: Option<(u32, String)> = None;
        for node in &response.data.content {
            flatten_content(node, chapter, &mut current, &mut verses);
        }
        if let Some((number, text)) = current.take() {
            push_verse(&mut verses, chapter, number, text);
        }
        Ok(verses)
    }
}

#[derive(Debug, Deserialize)]
struct BooksResponse {
    data: Vec<BookEntry>,
}

#[derive(Debug, Deserialize)]
struct BookEntry {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ChapterResponse {
    data: ChapterData,
}

#[derive(Debug, Deserialize)]
struct ChapterData {
    #[serde(default)]
    content: Vec<ContentNode>,
}

/// One node of API.Bible's structured JSON content: nested tag/text items
/// where `verse` tags carry the verse number and text nodes carry the words.
#[derive(Debug, Deserialize)]
struct ContentNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    attrs: Option<ContentAttrs>,
    #[serde(default)]
    items: Option<Vec<ContentNode>>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentAttrs {
    #[serde(default)]
    number: Option<String>,
}

/// Walks the content tree, opening a new verse at each `verse` tag and
/// appending text nodes to the currently open one. Text before the first
/// verse tag (headings, intros) has no verse and is dropped.
fn flatten_content(
    node: &ContentNode,
    chapter: u32,
    current: &mut Option<(u32, String)>,
    verses: &mut Vec<Verse>,
) {
    if node.name.as_deref() == Some("verse") {
        if let Some(number) = node
            .attrs
            .as_ref()
            .and_then(|a| a.number.as_ref())
            .and_then(|n| n.parse::<u32>().ok())
        {
            if let Some((prev_number, prev_text)) = current.take() {
                push_verse(verses, chapter, prev_number, prev_text);
            }
            *current = Some((number, String::new()));
        }
    }

    if let Some(text) = &node.text {
        if let Some((_, buffer)) = current {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                if !buffer.is_empty() {
                    buffer.push(' ');
                }
                buffer.push_str(trimmed);
            }
        }
    }

    if let Some(items) = &node.items {
        for child in items {
            flatten_content(child, chapter, current, verses);
        }
    }
}

fn push_verse(verses: &mut Vec<Verse>, chapter: u32, number: u32, text: String) {
    verses.push(Verse::new(chapter, number, text.trim().to_string()));
}

#[async_trait]
impl PassageSource for ApiBibleSource {
    fn source(&self) -> VerseSource {
        VerseSource::ApiBible
    }

    async fn fetch_passage(
        &self,
        provider_id: &str,
        reference: &ParsedReference,
    ) -> Result<Vec<Verse>, SourceError> {
        let Some(api_key) = &self.api_key else {
            return Err(SourceError::NotConfigured {
                verse_source: VerseSource::ApiBible,
            });
        };

        let Some(book_id) = self
            .resolve_book_id(api_key, provider_id, &reference.book)
            .await?
        else {
            // Provider responded fine, it just has no such book.
            return Ok(Vec::new());
        };

        let mut verses = Vec::new();
        for chapter in reference.chapters() {
            verses.extend(
                self.fetch_chapter(api_key, provider_id, &book_id, chapter)
                    .await?,
            );
        }

        // Client-side range filter over the retrieved chapters.
        verses.retain(|v| reference.contains(v.chapter, v.verse));
        Ok(verses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse_tag(number: &str) -> ContentNode {
        ContentNode {
            name: Some("verse".to_string()),
            attrs: Some(ContentAttrs {
                number: Some(number.to_string()),
            }),
            items: None,
            text: None,
        }
    }

    fn text_node(text: &str) -> ContentNode {
        ContentNode {
            name: None,
            attrs: None,
            items: None,
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn test_flatten_structured_content() {
        let para = ContentNode {
            name: Some("para".to_string()),
            attrs: None,
            items: Some(vec![
                verse_tag("1"),
                text_node("In the beginning "),
                text_node("God created the heavens and the earth."),
                verse_tag("2"),
                text_node("The earth was without form and void."),
            ]),
            text: None,
        };

        let mut verses = Vec::new();
        let mut current = None;
        flatten_content(&para, 1, &mut current, &mut verses);
        if let Some((number, text)) = current.take() {
            push_verse(&mut verses, 1, number, text);
        }

        assert_eq!(verses.len(), 2);
        assert_eq!(
            verses[0],
            Verse::new(1, 1, "In the beginning God created the heavens and the earth.")
        );
        assert_eq!(verses[1].verse, 2);
    }

    #[test]
    fn test_heading_text_before_first_verse_is_dropped() {
        let para = ContentNode {
            name: Some("para".to_string()),
            attrs: None,
            items: Some(vec![
                text_node("The Creation of the World"),
                verse_tag("1"),
                text_node("In the beginning..."),
            ]),
            text: None,
        };

        let mut verses = Vec::new();
        let mut current = None;
        flatten_content(&para, 1, &mut current, &mut verses);
        if let Some((number, text)) = current.take() {
            push_verse(&mut verses, 1, number, text);
        }

        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].text, "In the beginning...");
    }
}
