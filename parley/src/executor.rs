//! Fallback-chain execution.
//!
//! The executor walks a plan's steps strictly in order and returns the
//! first non-empty result. A failing source is logged and treated
//! exactly like an empty one; a turn never aborts because one
//! information source is down. Transform steps (simplify/explain) run
//! locally against the conversation's last response instead of calling
//! out.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::SourceError;
use crate::nlp::{Simplifier, Summarizer};
use crate::sources::InfoSource;
use crate::types::{ActionKind, ActionStep, Plan};

/// Reply used when every step of a chain came back empty.
pub const NO_RESULT_REPLY: &str = "Sorry, I couldn't find an answer.";

/// How many candidate options a clarification lists.
const CLARIFICATION_OPTIONS: usize = 5;

/// The concrete source bound to each remote action kind.
pub struct SourceBindings {
    pub encyclopedia: Arc<dyn InfoSource>,
    pub web: Arc<dyn InfoSource>,
    pub weather: Arc<dyn InfoSource>,
    pub clock: Arc<dyn InfoSource>,
    pub llm: Arc<dyn InfoSource>,
}

impl SourceBindings {
    fn for_kind(&self, kind: ActionKind) -> Option<&Arc<dyn InfoSource>> {
        match kind {
            ActionKind::Encyclopedia => Some(&self.encyclopedia),
            ActionKind::WebSearch => Some(&self.web),
            ActionKind::Weather => Some(&self.weather),
            ActionKind::Time => Some(&self.clock),
            ActionKind::LanguageModel => Some(&self.llm),
            ActionKind::Simplify | ActionKind::Explain => None,
        }
    }
}

pub struct Executor {
    bindings: SourceBindings,
    simplifier: Simplifier,
    summarizer: Summarizer,
}

impl Executor {
    pub fn new(bindings: SourceBindings, simplifier: Simplifier, summarizer: Summarizer) -> Self {
        Self {
            bindings,
            simplifier,
            summarizer,
        }
    }

    /// Run the chain. Always returns a user-facing string; never an
    /// error.
    pub async fn execute(&self, plan: &Plan, last_response: &str) -> String {
        for step in &plan.steps {
            match self.run_step(step, last_response).await {
                StepOutcome::Answer(text) => return text,
                StepOutcome::Empty => continue,
            }
        }
        NO_RESULT_REPLY.to_string()
    }

    async fn run_step(&self, step: &ActionStep, last_response: &str) -> StepOutcome {
        match step.kind {
            // Transforms ignore the step argument and read the state.
            ActionKind::Simplify => StepOutcome::from(self.simplifier.simplify(last_response)),
            ActionKind::Explain => StepOutcome::from(self.summarizer.explain(last_response)),
            kind => {
                let source = self
                    .bindings
                    .for_kind(kind)
                    .expect("every remote action kind has a binding");
                let arg = step.arg.as_deref().unwrap_or("");

                match source.fetch(arg).await {
                    Ok(Some(text)) => {
                        debug!(source = source.name(), "step answered");
                        StepOutcome::from(text)
                    }
                    Ok(None) => {
                        debug!(source = source.name(), "step had no answer");
                        StepOutcome::Empty
                    }
                    Err(SourceError::Ambiguous { options }) => {
                        // Ambiguity terminates the chain: asking the user
                        // to narrow down beats guessing or falling back.
                        StepOutcome::Answer(clarification_message(&options))
                    }
                    Err(err @ SourceError::Unavailable(_)) => {
                        warn!(source = source.name(), %err, "source failed, continuing chain");
                        StepOutcome::Empty
                    }
                }
            }
        }
    }
}

enum StepOutcome {
    Answer(String),
    Empty,
}

impl From<String> for StepOutcome {
    fn from(text: String) -> Self {
        if text.trim().is_empty() {
            StepOutcome::Empty
        } else {
            StepOutcome::Answer(text)
        }
    }
}

fn clarification_message(options: &[String]) -> String {
    if options.is_empty() {
        return "Your query was too broad. Try being more specific.".to_string();
    }
    let listed: Vec<&str> = options
        .iter()
        .take(CLARIFICATION_OPTIONS)
        .map(String::as_str)
        .collect();
    format!(
        "Your query was too broad. Try being more specific. Options: {}",
        listed.join(", ")
    )
}
