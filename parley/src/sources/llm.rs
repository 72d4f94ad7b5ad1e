//! Language-model fallback via an OpenAI-compatible chat endpoint.
//!
//! Only used as the last step of a definition chain. Without an API key
//! the source is permanently empty, which the executor treats the same
//! as any other source that has nothing to say.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{InfoSource, SourceResult};
use crate::error::SourceError;

const MAX_COMPLETION_TOKENS: u32 = 256;

pub struct OpenAiSource {
    client: reqwest::Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiSource {
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            model: model.into(),
            api_key,
        }
    }
}

#[async_trait]
impl InfoSource for OpenAiSource {
    fn name(&self) -> &str {
        "llm"
    }

    async fn fetch(&self, query: &str) -> SourceResult {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("no API key configured, llm source is inert");
            return Ok(None);
        };
        if query.trim().is_empty() {
            return Ok(None);
        }

        let body = json!({
            "model": self.model,
            "max_tokens": MAX_COMPLETION_TOKENS,
            "messages": [{
                "role": "user",
                "content": format!("In two sentences, define: {}", query),
            }],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(SourceError::unavailable)?;

        if !response.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "llm endpoint returned {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(SourceError::unavailable)?;
        let content = json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .trim()
            .to_string();

        if content.is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }
}
