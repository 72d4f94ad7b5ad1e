//! Goal-to-plan mapping.
//!
//! The planner is a pure function from a classified intent to an ordered
//! action sequence (a fallback chain). Binding of action kinds to
//! concrete services happens in the executor, so plans can be asserted
//! on without any network in sight.

use tracing::debug;

use crate::types::{ActionKind, ActionStep, Goal, Intent, Plan};

pub struct Planner;

impl Planner {
    pub fn new() -> Self {
        Self
    }

    /// Expand an intent into its fallback chain. Deterministic: the same
    /// (goal, params) always produces the same plan.
    pub fn plan(&self, intent: &Intent) -> Plan {
        let steps = match intent.goal {
            Goal::Weather => vec![step_with(ActionKind::Weather, intent.param("city"))],
            Goal::Time => vec![step_with(ActionKind::Time, intent.param("city"))],
            // The "wiki or llm" definition lookup, expressed as an
            // explicit two-step chain.
            Goal::Define => {
                let topic = intent.param("topic");
                vec![
                    step_with(ActionKind::Encyclopedia, topic),
                    step_with(ActionKind::LanguageModel, topic),
                ]
            }
            // Transforms ignore parsed parameters; they always operate
            // on the conversation state.
            Goal::Simplify => vec![ActionStep::bare(ActionKind::Simplify)],
            Goal::Explain => vec![ActionStep::bare(ActionKind::Explain)],
            Goal::Search => {
                let query = intent.param("query");
                vec![
                    step_with(ActionKind::Encyclopedia, query),
                    step_with(ActionKind::WebSearch, query),
                ]
            }
        };

        debug!(goal = ?intent.goal, steps = steps.len(), "planned fallback chain");
        Plan::new(steps)
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

fn step_with(kind: ActionKind, arg: Option<&str>) -> ActionStep {
    match arg {
        Some(a) => ActionStep::new(kind, a),
        None => ActionStep::bare(kind),
    }
}
