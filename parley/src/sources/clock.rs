//! Local-time lookup, piggybacking on wttr.in's custom format strings.
//!
//! `%T %Z` yields the observation-local time and zone for the queried
//! place, which is all the agent needs for a "time in X" turn.

use async_trait::async_trait;

use super::{InfoSource, SourceResult};
use crate::error::SourceError;

pub struct WttrClockSource {
    client: reqwest::Client,
    base_url: String,
}

impl WttrClockSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl InfoSource for WttrClockSource {
    fn name(&self) -> &str {
        "wttr-clock"
    }

    async fn fetch(&self, query: &str) -> SourceResult {
        let url = format!(
            "{}/{}?format=%l:+%T+%Z",
            self.base_url,
            urlencoding::encode(query.trim())
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(SourceError::unavailable)?;

        if !response.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "wttr.in returned {}",
                response.status()
            )));
        }

        let body = response.text().await.map_err(SourceError::unavailable)?;
        let line = body.trim();
        if line.is_empty() || line.contains("Unknown location") {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }
}
