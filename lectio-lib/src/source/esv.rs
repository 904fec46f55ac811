//! ESV API source (api.esv.org).
//!
//! Primary licensed-text provider: one GET per whole reference, plain-text
//! passages with bracketed verse numbers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::bracketed::parse_bracketed_text;
use super::PassageSource;
use crate::error::SourceError;
use crate::model::ParsedReference;
use crate::model::Verse;
use crate::model::VerseSource;

const DEFAULT_BASE_URL: &str = "https://api.esv.org/v3";

/// Source adapter for the ESV API.
///
/// Requires an API key; constructed without one it reports
/// [`SourceError::NotConfigured`] on every fetch instead of crashing.
pub struct EsvSource {
    http_client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Option<Duration>,
}

impl EsvSource {
    /// Creates a new ESV source.
    pub fn new(http_client: Client, api_key: Option<String>, timeout: Option<Duration>) -> Self {
        Self {
            http_client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    /// Overrides the base URL (for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct EsvPassageResponse {
    passages: Vec<String>,
}

#[async_trait]
impl PassageSource for EsvSource {
    fn source(&self) -> VerseSource {
        VerseSource::Esv
    }

    async fn fetch_passage(
        &self,
        _provider_id: &str,
        reference: &ParsedReference,
    ) -> Result<Vec<Verse>, SourceError> {
        let Some(api_key) = &self.api_key else {
            return Err(SourceError::NotConfigured {
                verse_source: VerseSource::Esv,
            });
        };

        let url = format!(
            "{}/passage/text/?q={}\
             &include-passage-references=false\
             &include-footnotes=false\
             &include-headings=false\
             &include-short-copyright=false\
             &include-verse-numbers=true",
            self.base_url,
            urlencoding::encode(&reference.to_string())
        );

        let mut request = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Token {api_key}"));
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::http(status, body));
        }

        let parsed: EsvPassageResponse = response
            .json()
            .await
            .map_err(|e| SourceError::parse(format!("ESV passage response: {e}")))?;

        let mut verses = Vec::new();
        for passage in &parsed.passages {
            verses.extend(parse_bracketed_text(passage, reference.start_chapter));
        }
        Ok(verses)
    }
}
