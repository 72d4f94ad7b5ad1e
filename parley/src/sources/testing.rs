//! Mock sources for testing
//!
//! These doubles let the executor and turn pipeline be exercised
//! without real I/O, and record how often each source was invoked so
//! tests can assert on short-circuiting.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{InfoSource, SourceResult};
use crate::error::SourceError;

/// Returns the same canned reply on every call.
pub struct StaticSource {
    name: String,
    reply: Option<String>,
    calls: AtomicUsize,
    /// Record of the queries received
    pub queries: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn answering(name: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A source that never has anything to say.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reply: None,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InfoSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &str) -> SourceResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails every call with `SourceError::Unavailable`.
pub struct FailingSource {
    name: String,
    calls: AtomicUsize,
}

impl FailingSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InfoSource for FailingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _query: &str) -> SourceResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SourceError::Unavailable("synthetic failure".to_string()))
    }
}

/// Signals ambiguity with a fixed candidate list.
pub struct AmbiguousSource {
    name: String,
    options: Vec<String>,
}

impl AmbiguousSource {
    pub fn new(name: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

#[async_trait]
impl InfoSource for AmbiguousSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _query: &str) -> SourceResult {
        Err(SourceError::Ambiguous {
            options: self.options.clone(),
        })
    }
}
