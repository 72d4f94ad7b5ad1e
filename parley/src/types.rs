//! Core types for the turn pipeline

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// High-level classification of a user utterance.
///
/// Order-sensitive matching lives in the interpreter; the goal itself is
/// just the tag the planner dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    /// Current weather for a city
    Weather,
    /// Local time for a city
    Time,
    /// Encyclopedic definition of a topic
    Define,
    /// Reword the previous answer with simpler vocabulary
    Simplify,
    /// Expand the previous answer into an extractive bullet summary
    Explain,
    /// Catch-all free-text lookup
    Search,
}

/// A classified utterance: the goal plus the parameters the matching
/// rule extracted from the text (e.g. `city`, `topic`, `query`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub goal: Goal,
    pub params: HashMap<String, String>,
    /// The raw utterance, kept for logging
    pub original_request: String,
}

impl Intent {
    pub fn new(goal: Goal, original_request: impl Into<String>) -> Self {
        Self {
            goal,
            params: HashMap::new(),
            original_request: original_request.into(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// The fixed set of actions a plan step can bind to.
///
/// Source kinds resolve to an external collaborator in the executor;
/// transform kinds run locally on the last response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Weather,
    Time,
    Encyclopedia,
    WebSearch,
    LanguageModel,
    Simplify,
    Explain,
}

impl ActionKind {
    /// Transforms read the conversation state instead of their argument.
    pub fn is_transform(&self) -> bool {
        matches!(self, ActionKind::Simplify | ActionKind::Explain)
    }
}

/// One step of a fallback chain: an action kind and its optional
/// string payload. Transform steps carry no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStep {
    pub kind: ActionKind,
    pub arg: Option<String>,
}

impl ActionStep {
    pub fn new(kind: ActionKind, arg: impl Into<String>) -> Self {
        Self {
            kind,
            arg: Some(arg.into()),
        }
    }

    pub fn bare(kind: ActionKind) -> Self {
        Self { kind, arg: None }
    }
}

/// An ordered sequence of steps to try until one produces an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<ActionStep>,
}

impl Plan {
    pub fn new(steps: Vec<ActionStep>) -> Self {
        Self { steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// The single slot of mutable conversation state: the last non-empty
/// assistant response. Input to the Simplify/Explain transforms only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationState {
    pub last_response: String,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot. Called once per turn by the agent.
    pub fn record(&mut self, response: impl Into<String>) {
        self.last_response = response.into();
    }

    pub fn clear(&mut self) {
        self.last_response.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_builder() {
        let intent = Intent::new(Goal::Weather, "weather in Paris").with_param("city", "Paris");
        assert_eq!(intent.goal, Goal::Weather);
        assert_eq!(intent.param("city"), Some("Paris"));
        assert_eq!(intent.param("topic"), None);
    }

    #[test]
    fn test_transform_kinds() {
        assert!(ActionKind::Simplify.is_transform());
        assert!(ActionKind::Explain.is_transform());
        assert!(!ActionKind::Encyclopedia.is_transform());
        assert!(!ActionKind::Weather.is_transform());
    }

    #[test]
    fn test_state_record_and_clear() {
        let mut state = ConversationState::new();
        assert!(state.last_response.is_empty());
        state.record("an answer");
        assert_eq!(state.last_response, "an answer");
        state.clear();
        assert!(state.last_response.is_empty());
    }
}
