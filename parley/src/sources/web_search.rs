//! General web search via the DuckDuckGo Instant Answer API.
//!
//! Free, no API key. The abstract text is preferred; failing that, the
//! first related topic's text is used.

use async_trait::async_trait;
use tracing::debug;

use super::{InfoSource, SourceResult};
use crate::error::SourceError;

pub struct DuckDuckGoSource {
    client: reqwest::Client,
    base_url: String,
}

impl DuckDuckGoSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl InfoSource for DuckDuckGoSource {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn fetch(&self, query: &str) -> SourceResult {
        if query.trim().is_empty() {
            return Ok(None);
        }

        let url = format!(
            "{}/?q={}&format=json&no_html=1&skip_disambig=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(SourceError::unavailable)?;

        if !response.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "duckduckgo returned {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(SourceError::unavailable)?;

        if let Some(abstract_text) = json.get("AbstractText").and_then(|v| v.as_str()) {
            if !abstract_text.is_empty() {
                return Ok(Some(format!("(From Web) {}", abstract_text)));
            }
        }

        // Fall back to the first related topic with usable text.
        if let Some(topics) = json.get("RelatedTopics").and_then(|v| v.as_array()) {
            for topic in topics {
                if let Some(text) = topic.get("Text").and_then(|v| v.as_str()) {
                    if !text.is_empty() {
                        return Ok(Some(format!("(From Web) {}", text)));
                    }
                }
            }
        }

        debug!(query, "duckduckgo had no abstract or related topics");
        Ok(None)
    }
}
