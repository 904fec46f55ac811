//! bible-api.com source.
//!
//! Keyless last-resort generic provider: one GET with the translation
//! short-code in the query string, JSON `{verses: [...]}` body. The app's
//! version abbreviation is remapped to a short-code by the registry before
//! it reaches this source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::PassageSource;
use crate::error::SourceError;
use crate::model::ParsedReference;
use crate::model::Verse;
use crate::model::VerseSource;

const DEFAULT_BASE_URL: &str = "https://bible-api.com";

/// Source adapter for bible-api.com.
pub struct BibleApiSource {
    http_client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl BibleApiSource {
    /// Creates a new bible-api.com source.
    pub fn new(http_client: Client, timeout: Option<Duration>) -> Self {
        Self {
            http_client,
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
struct BibleApiResponse {
    #[serde(default)]
    verses: Vec<BibleApiVerse>,
}

#[derive(Debug, Deserialize)]
struct BibleApiVerse {
    chapter: u32,
    verse: u32,
    text: String,
}

#[async_trait]
impl PassageSource for BibleApiSource {
    fn source(&self) -> VerseSource {
        VerseSource::BibleApi
    }

    async fn fetch_passage(
        &self,
        provider_id: &str,
        reference: &ParsedReference,
    ) -> Result<Vec<Verse>, SourceError> {
        let url = format!(
            "{}/{}?translation={}",
            self.base_url,
            urlencoding::encode(&reference.to_string()),
            urlencoding::encode(provider_id)
        );

        let mut request = self.http_client.get(&url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        // The provider answers 404 for passages it does not carry; that is a
        // successful "nothing here", not a failure.
        if response.status().as_u16() == 404 {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::http(status, body));
        }

        let parsed: BibleApiResponse = response
            .json()
            .await
            .map_err(|e| SourceError::parse(format!("bible-api.com response: {e}")))?;

        Ok(parsed
            .verses
            .into_iter()
            .map(|v| Verse::new(v.chapter, v.verse, v.text.trim().to_string()))
            .collect())
    }
}
