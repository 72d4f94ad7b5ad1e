//! Agent configuration.
//!
//! Plain serde structs loaded from TOML. Every field has a default, so
//! an absent file or an empty table still yields a working agent.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AgentError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParleyConfig {
    /// Two-column CSV of (difficult, simple) word pairs. Absent or
    /// unreadable data disables simplification, it never aborts startup.
    pub substitutions: Option<PathBuf>,
    /// One stopword per line, for the summarizer's centrality ranking.
    /// Unset means the built-in English list; unreadable means the
    /// summarizer degrades to leading-sentences.
    pub stopwords: Option<PathBuf>,
    pub sources: SourcesConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourcesConfig {
    pub user_agent: String,
    /// Per-request timeout; a slow source must give up, not stall the turn.
    pub timeout_secs: u64,
    pub wikipedia_base: String,
    pub search_base: String,
    pub weather_base: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; parley)".to_string(),
            timeout_secs: 10,
            wikipedia_base: "https://en.wikipedia.org".to_string(),
            search_base: "https://api.duckduckgo.com".to_string(),
            weather_base: "https://wttr.in".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub api_base: String,
    pub model: String,
    /// Name of the environment variable holding the API key. No key
    /// means the language-model step is inert.
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl ParleyConfig {
    pub fn load(path: &Path) -> Result<Self, AgentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| AgentError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| AgentError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Resolved API key, if the configured env var is set and non-empty.
    pub fn llm_api_key(&self) -> Option<String> {
        std::env::var(&self.llm.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}
