//! Parley — a rule-based conversational agent.
//!
//! A user utterance flows through three stages: the [`Interpreter`]
//! classifies it into a [`Goal`] with extracted parameters via an
//! ordered regex rule list; the [`Planner`] expands the goal into a
//! fallback chain of abstract actions; the [`Executor`] runs the chain
//! against external information sources (and the local text transforms)
//! until one step produces a non-empty answer. The only conversation
//! state is the last response, which the simplify/explain transforms
//! rework on demand.

pub mod agent;
pub mod config;
pub mod error;
pub mod executor;
pub mod interpreter;
pub mod nlp;
pub mod planner;
pub mod sources;
pub mod types;

pub use agent::Agent;
pub use config::ParleyConfig;
pub use error::{AgentError, SourceError};
pub use executor::{Executor, SourceBindings, NO_RESULT_REPLY};
pub use interpreter::Interpreter;
pub use planner::Planner;
pub use types::{ActionKind, ActionStep, ConversationState, Goal, Intent, Plan};
