//! NLT API source (api.nlt.to).
//!
//! Secondary licensed-text provider. Same bracketed-verse-number text format
//! as the ESV API, but a different base URL, a key passed as a query
//! parameter, and a provider-specific translation id (`NLT`, `KJV`, ...).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::bracketed::parse_bracketed_text;
use super::PassageSource;
use crate::error::SourceError;
use crate::model::ParsedReference;
use crate::model::Verse;
use crate::model::VerseSource;

const DEFAULT_BASE_URL: &str = "https://api.nlt.to/api";

/// Source adapter for the NLT API.
pub struct NltSource {
    http_client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Option<Duration>,
}

impl NltSource {
    /// Creates a new NLT source.
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

#[async_trait]
impl PassageSource for NltSource {
    fn source(&self) -> VerseSource {
        VerseSource::Nlt
    }

    async fn fetch_passage(
        &self,
        provider_id: &str,
        reference: &ParsedReference,
    ) -> Result<Vec<Verse>, SourceError> {
        let Some(api_key) = &self.api_key else {
            return Err(SourceError::NotConfigured {
                verse_source: VerseSource::Nlt,
            });
        };

        let url = format!(
            "{}/passages?ref={}&version={}&key={}",
            self.base_url,
            urlencoding::encode(&reference.to_string()),
            urlencoding::encode(provider_id),
            urlencoding::encode(api_key)
        );

        let mut request = self.http_client.get(&url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::http(status, body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::parse(format!("NLT passage body: {e}")))?;

        Ok(parse_bracketed_text(&body, reference.start_chapter))
    }
}
