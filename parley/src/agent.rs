//! The turn pipeline glued together.
//!
//! One call per user utterance: interpret → plan → execute, then
//! overwrite the single last-response slot. `handle_turn` never fails;
//! every degradation inside the pipeline has already been folded into a
//! user-facing string by the time it returns.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ParleyConfig;
use crate::error::AgentError;
use crate::executor::{Executor, SourceBindings, NO_RESULT_REPLY};
use crate::interpreter::Interpreter;
use crate::nlp::simplifier::load_substitution_table;
use crate::nlp::{Simplifier, Stopwords, Summarizer};
use crate::planner::Planner;
use crate::sources::{
    http_client, DuckDuckGoSource, OpenAiSource, WikipediaSource, WttrClockSource, WttrSource,
};
use crate::types::ConversationState;

pub struct Agent {
    interpreter: Interpreter,
    planner: Planner,
    executor: Executor,
}

impl Agent {
    pub fn new(interpreter: Interpreter, planner: Planner, executor: Executor) -> Self {
        Self {
            interpreter,
            planner,
            executor,
        }
    }

    /// Build the production agent: default rules, HTTP sources from the
    /// config, and the local transforms. Missing substitution or
    /// stopword data degrades the corresponding transform with a single
    /// warning; it never aborts startup.
    pub async fn from_config(config: &ParleyConfig) -> Result<Self, AgentError> {
        let client = http_client(&config.sources.user_agent, config.sources.timeout_secs)
            .map_err(|e| AgentError::HttpClient(e.to_string()))?;

        let bindings = SourceBindings {
            encyclopedia: Arc::new(WikipediaSource::new(
                client.clone(),
                config.sources.wikipedia_base.clone(),
            )),
            web: Arc::new(DuckDuckGoSource::new(
                client.clone(),
                config.sources.search_base.clone(),
            )),
            weather: Arc::new(WttrSource::new(
                client.clone(),
                config.sources.weather_base.clone(),
            )),
            clock: Arc::new(WttrClockSource::new(
                client.clone(),
                config.sources.weather_base.clone(),
            )),
            llm: Arc::new(OpenAiSource::new(
                client,
                config.llm.api_base.clone(),
                config.llm.model.clone(),
                config.llm_api_key(),
            )),
        };

        let simplifier = match &config.substitutions {
            Some(path) => match load_substitution_table(path).await {
                Ok(table) => {
                    info!(entries = table.len(), "loaded substitution table");
                    Simplifier::new(table)
                }
                Err(err) => {
                    warn!(%err, "simplification disabled");
                    Simplifier::identity()
                }
            },
            None => {
                warn!("no substitution table configured, simplification disabled");
                Simplifier::identity()
            }
        };

        // Strategy probe happens once, here; the summarizer caches it.
        let summarizer = match &config.stopwords {
            Some(path) => match tokio::fs::read_to_string(path).await {
                Ok(raw) => {
                    let stopwords = Stopwords::from_text(&raw);
                    if stopwords.is_empty() {
                        warn!(path = %path.display(), "stopword file empty, summarizer degraded to leading sentences");
                        Summarizer::leading()
                    } else {
                        Summarizer::with_stopwords(stopwords)
                    }
                }
                Err(err) => {
                    warn!(%err, "stopword file unreadable, summarizer degraded to leading sentences");
                    Summarizer::leading()
                }
            },
            None => Summarizer::with_stopwords(Stopwords::default_english()),
        };
        info!(strategy = summarizer.strategy_name(), "summarizer ready");

        Ok(Self::new(
            Interpreter::with_default_rules(),
            Planner::new(),
            Executor::new(bindings, simplifier, summarizer),
        ))
    }

    /// Process one utterance to completion and update the state slot.
    /// Empty input yields an empty reply and leaves the state alone.
    pub async fn handle_turn(&self, user_text: &str, state: &mut ConversationState) -> String {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return String::new();
        }

        let intent = self.interpreter.interpret(user_text);
        let plan = self.planner.plan(&intent);
        let reply = self.executor.execute(&plan, &state.last_response).await;

        info!(goal = ?intent.goal, reply_len = reply.len(), "turn complete");

        // A turn that produced nothing clears the slot, so a later
        // "simplify" does not rework a stale answer.
        if reply == NO_RESULT_REPLY {
            state.clear();
        } else {
            state.record(reply.clone());
        }
        reply
    }
}
