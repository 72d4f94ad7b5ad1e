//! Encyclopedic lookup against the MediaWiki APIs.
//!
//! Two round trips: `opensearch` to resolve the query to candidate page
//! titles, then the REST `page/summary` endpoint for the extract. A
//! disambiguation page becomes [`SourceError::Ambiguous`] carrying the
//! other candidates, so the caller can ask the user to narrow down
//! instead of guessing.

use async_trait::async_trait;
use tracing::debug;

use super::{InfoSource, SourceResult};
use crate::error::SourceError;
use crate::nlp::sentences::split_sentences;

/// How many title candidates to request; also caps the options listed
/// in a clarification.
const CANDIDATE_LIMIT: usize = 5;

/// How many leading sentences of the extract to keep.
const SUMMARY_SENTENCES: usize = 2;

pub struct WikipediaSource {
    client: reqwest::Client,
    base_url: String,
}

impl WikipediaSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<String>, SourceError> {
        let url = format!(
            "{}/w/api.php?action=opensearch&search={}&limit={}&namespace=0&format=json",
            self.base_url,
            urlencoding::encode(query),
            CANDIDATE_LIMIT
        );

        let json: serde_json::Value = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(SourceError::unavailable)?
            .json()
            .await
            .map_err(SourceError::unavailable)?;

        // opensearch replies [query, [titles], [descriptions], [urls]]
        let titles = json
            .get(1)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|t| t.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(titles)
    }

    async fn page_summary(&self, title: &str) -> Result<Option<PageSummary>, SourceError> {
        let url = format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base_url,
            urlencoding::encode(&title.replace(' ', "_"))
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(SourceError::unavailable)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "wikipedia summary returned {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(SourceError::unavailable)?;
        let kind = json
            .get("type")
            .and_then(|v| v.as_str())
            .unwrap_or("standard")
            .to_string();
        let extract = json
            .get("extract")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        Ok(Some(PageSummary { kind, extract }))
    }
}

struct PageSummary {
    kind: String,
    extract: String,
}

#[async_trait]
impl InfoSource for WikipediaSource {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn fetch(&self, query: &str) -> SourceResult {
        if query.trim().is_empty() {
            return Ok(None);
        }

        let titles = self.search_titles(query).await?;
        let Some(first) = titles.first() else {
            debug!(query, "no wikipedia titles matched");
            return Ok(None);
        };

        let Some(summary) = self.page_summary(first).await? else {
            return Ok(None);
        };

        if summary.kind == "disambiguation" {
            // Offer the remaining candidates instead of picking one.
            let options: Vec<String> = titles.iter().skip(1).cloned().collect();
            return Err(SourceError::Ambiguous { options });
        }

        if summary.extract.is_empty() {
            return Ok(None);
        }

        let lead: Vec<String> = split_sentences(&summary.extract)
            .into_iter()
            .take(SUMMARY_SENTENCES)
            .collect();
        Ok(Some(format!("(From Wikipedia) {}", lead.join(" "))))
    }
}
