//! Weather lookup via wttr.in one-line format.

use async_trait::async_trait;

use super::{InfoSource, SourceResult};
use crate::error::SourceError;

pub struct WttrSource {
    client: reqwest::Client,
    base_url: String,
}

impl WttrSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl InfoSource for WttrSource {
    fn name(&self) -> &str {
        "wttr"
    }

    /// An empty query is allowed: wttr.in then geolocates the caller.
    async fn fetch(&self, query: &str) -> SourceResult {
        let url = format!(
            "{}/{}?format=3",
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
