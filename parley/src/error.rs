//! Error types for the turn pipeline.
//!
//! Sources signal failure through `SourceError`; the executor swallows
//! `Unavailable` and keeps walking the chain, so no error here ever
//! crosses out of a turn.

use thiserror::Error;

/// Failure modes of an external information source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source failed, timed out, or returned garbage. Treated as an
    /// empty result by the executor.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The query matched several distinct subjects; the caller should
    /// surface the candidates instead of guessing.
    #[error("ambiguous query, {} candidates", options.len())]
    Ambiguous { options: Vec<String> },
}

impl SourceError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        SourceError::Unavailable(err.to_string())
    }
}

/// Errors surfaced by setup and configuration, not by turns.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },

    #[error("failed to load substitution table {path}: {reason}")]
    SubstitutionLoad { path: String, reason: String },

    #[error("failed to build http client: {0}")]
    HttpClient(String),
}
