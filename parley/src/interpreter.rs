//! Intent interpretation via ordered pattern rules.
//!
//! A fixed, ordered list of (goal, regex) rules is evaluated against the
//! utterance; the first match wins and its named captures become the
//! intent parameters. Order is part of the contract: transform keywords
//! are tested before source keywords, and the `Search` catch-all always
//! matches last. Overlapping keywords ("what is weather") resolve purely
//! by rule order, not by any semantic understanding.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::{Goal, Intent};

static RULE_SIMPLIFY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:simplify|reword|simpler)\b").unwrap());

static RULE_EXPLAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:explain|expand|elaborate)\b").unwrap());

static RULE_WEATHER_IN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bweather\b.*?\b(?:in|for|at)\s+(?P<city>[^?.!,]+?)\s*[?.!]*\s*$").unwrap()
});

static RULE_WEATHER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bweather\b").unwrap());

static RULE_TIME_IN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\btime\b.*?\b(?:in|at|for)\s+(?P<city>[^?.!,]+?)\s*[?.!]*\s*$").unwrap()
});

static RULE_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btime\b").unwrap());

static RULE_DEFINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:define|what\s+is|what's|who\s+is|who's|tell\s+me\s+about)\s+(?P<topic>.+?)\s*[?.!]*\s*$",
    )
    .unwrap()
});

/// One entry of the ordered rule list.
pub struct IntentRule {
    pub goal: Goal,
    pub pattern: &'static Regex,
}

impl IntentRule {
    fn new(goal: Goal, pattern: &'static Regex) -> Self {
        Self { goal, pattern }
    }
}

/// Ordered-rule intent classifier.
///
/// The rule list is a constructor argument so tests can run with a
/// synthetic subset; `with_default_rules` builds the production order.
pub struct Interpreter {
    rules: Vec<IntentRule>,
}

impl Interpreter {
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// The default rule order. Transform goals go first (mirroring the
    /// read-eval loop, which offers reword/explain before lookups), then
    /// weather and time (city-capturing variant before the bare
    /// keyword), then define. Anything else falls through to `Search`.
    pub fn with_default_rules() -> Self {
        Self::new(vec![
            IntentRule::new(Goal::Simplify, &RULE_SIMPLIFY),
            IntentRule::new(Goal::Explain, &RULE_EXPLAIN),
            IntentRule::new(Goal::Weather, &RULE_WEATHER_IN),
            IntentRule::new(Goal::Weather, &RULE_WEATHER),
            IntentRule::new(Goal::Time, &RULE_TIME_IN),
            IntentRule::new(Goal::Time, &RULE_TIME),
            IntentRule::new(Goal::Define, &RULE_DEFINE),
        ])
    }

    /// Classify an utterance. Never fails: the catch-all binds the whole
    /// input to the `query` parameter.
    pub fn interpret(&self, text: &str) -> Intent {
        let text = text.trim();

        for rule in &self.rules {
            if let Some(captures) = rule.pattern.captures(text) {
                let mut intent = Intent::new(rule.goal, text);
                for name in rule.pattern.capture_names().flatten() {
                    if let Some(m) = captures.name(name) {
                        intent
                            .params
                            .insert(name.to_string(), m.as_str().trim().to_string());
                    }
                }
                debug!(goal = ?intent.goal, params = ?intent.params, "matched intent rule");
                return intent;
            }
        }

        debug!("no rule matched, falling through to search");
        Intent::new(Goal::Search, text).with_param("query", text)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
