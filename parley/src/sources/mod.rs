//! External information sources.
//!
//! Each collaborator implements the narrow [`InfoSource`] trait: one
//! query in, optionally one block of text out. Concrete bindings are
//! thin HTTP clients; every one enforces its own request timeout and
//! maps transport failures to [`SourceError::Unavailable`] so the
//! executor can swallow them and move down the chain.

pub mod clock;
pub mod llm;
pub mod testing;
pub mod weather;
pub mod web_search;
pub mod wikipedia;

pub use clock::WttrClockSource;
pub use llm::OpenAiSource;
pub use weather::WttrSource;
pub use web_search::DuckDuckGoSource;
pub use wikipedia::WikipediaSource;

use async_trait::async_trait;

use crate::error::SourceError;

/// `Ok(None)` means "no answer here, try the next step".
pub type SourceResult = Result<Option<String>, SourceError>;

/// A single external information source.
#[async_trait]
pub trait InfoSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Look the query up. Empty strings are normalized to `None` by the
    /// executor, so implementations may return either.
    async fn fetch(&self, query: &str) -> SourceResult;
}

/// Build the shared reqwest client the HTTP sources use.
pub(crate) fn http_client(user_agent: &str, timeout_secs: u64) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(SourceError::unavailable)
}
