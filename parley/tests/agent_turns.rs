//! End-to-end turn tests over mock sources.
//!
//! These exercise the whole interpret → plan → execute pipeline with
//! call-counting doubles, so fallback order and short-circuiting are
//! observable without any network.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use parley::executor::{Executor, SourceBindings, NO_RESULT_REPLY};
use parley::nlp::{Simplifier, Stopwords, SubstitutionTable, Summarizer};
use parley::sources::testing::{AmbiguousSource, FailingSource, StaticSource};
use parley::{Agent, ConversationState, Interpreter, Planner};

struct Harness {
    wiki: Arc<StaticSource>,
    web: Arc<StaticSource>,
    clock: Arc<StaticSource>,
    agent: Agent,
}

fn harness(wiki: Arc<StaticSource>, web: Arc<StaticSource>, clock: Arc<StaticSource>) -> Harness {
    let bindings = SourceBindings {
        encyclopedia: wiki.clone(),
        web: web.clone(),
        weather: Arc::new(StaticSource::empty("weather")),
        clock: clock.clone(),
        llm: Arc::new(StaticSource::empty("llm")),
    };
    let simplifier = Simplifier::new(SubstitutionTable::from_rows([("ubiquitous", "common")]));
    let summarizer = Summarizer::with_stopwords(Stopwords::default_english());
    let agent = Agent::new(
        Interpreter::with_default_rules(),
        Planner::new(),
        Executor::new(bindings, simplifier, summarizer),
    );
    Harness {
        wiki,
        web,
        clock,
        agent,
    }
}

#[tokio::test]
async fn time_query_routes_to_clock_source_verbatim() {
    let h = harness(
        Arc::new(StaticSource::empty("wiki")),
        Arc::new(StaticSource::empty("web")),
        Arc::new(StaticSource::answering("clock", "14:00 JST")),
    );
    let mut state = ConversationState::new();

    let reply = h.agent.handle_turn("time in Tokyo", &mut state).await;
    assert_eq!(reply, "14:00 JST");
    assert_eq!(h.clock.call_count(), 1);
    assert_eq!(h.clock.queries.lock().unwrap().as_slice(), ["Tokyo"]);
    // No other source was consulted.
    assert_eq!(h.wiki.call_count(), 0);
    assert_eq!(h.web.call_count(), 0);
}

#[tokio::test]
async fn search_prefers_encyclopedia_and_skips_web() {
    let h = harness(
        Arc::new(StaticSource::answering("wiki", "(From Wikipedia) Rust is a language.")),
        Arc::new(StaticSource::answering("web", "(From Web) something else")),
        Arc::new(StaticSource::empty("clock")),
    );
    let mut state = ConversationState::new();

    let reply = h.agent.handle_turn("rust language", &mut state).await;
    assert_eq!(reply, "(From Wikipedia) Rust is a language.");
    assert_eq!(h.wiki.call_count(), 1);
    assert_eq!(h.web.call_count(), 0);
}

#[tokio::test]
async fn search_falls_back_to_web_when_encyclopedia_is_empty() {
    let h = harness(
        Arc::new(StaticSource::empty("wiki")),
        Arc::new(StaticSource::answering("web", "(From Web) an answer")),
        Arc::new(StaticSource::empty("clock")),
    );
    let mut state = ConversationState::new();

    let reply = h.agent.handle_turn("obscure thing", &mut state).await;
    assert_eq!(reply, "(From Web) an answer");
    assert_eq!(h.wiki.call_count(), 1);
    assert_eq!(h.web.call_count(), 1);
}

#[tokio::test]
async fn failing_encyclopedia_still_reaches_web() {
    let wiki = Arc::new(FailingSource::new("wiki"));
    let web = Arc::new(StaticSource::answering("web", "(From Web) recovered"));
    let bindings = SourceBindings {
        encyclopedia: wiki.clone(),
        web: web.clone(),
        weather: Arc::new(StaticSource::empty("weather")),
        clock: Arc::new(StaticSource::empty("clock")),
        llm: Arc::new(StaticSource::empty("llm")),
    };
    let agent = Agent::new(
        Interpreter::with_default_rules(),
        Planner::new(),
        Executor::new(bindings, Simplifier::identity(), Summarizer::leading()),
    );
    let mut state = ConversationState::new();

    let reply = agent.handle_turn("anything", &mut state).await;
    assert_eq!(reply, "(From Web) recovered");
    assert_eq!(wiki.call_count(), 1);
    assert_eq!(web.call_count(), 1);
}

#[tokio::test]
async fn simplify_reworks_previous_answer() {
    let h = harness(
        Arc::new(StaticSource::answering("wiki", "The ubiquitous algorithm")),
        Arc::new(StaticSource::empty("web")),
        Arc::new(StaticSource::empty("clock")),
    );
    let mut state = ConversationState::new();

    let first = h.agent.handle_turn("tell me about algorithms", &mut state).await;
    assert_eq!(first, "The ubiquitous algorithm");

    let reworded = h.agent.handle_turn("simplify", &mut state).await;
    assert_eq!(reworded, "The common algorithm");
    // The reworded text becomes the new last response.
    assert_eq!(state.last_response, "The common algorithm");
    // No source was consulted for the transform turn.
    assert_eq!(h.wiki.call_count(), 1);
    assert_eq!(h.web.call_count(), 0);
}

#[tokio::test]
async fn simplify_with_no_previous_answer_gives_fixed_reply() {
    let h = harness(
        Arc::new(StaticSource::empty("wiki")),
        Arc::new(StaticSource::empty("web")),
        Arc::new(StaticSource::empty("clock")),
    );
    let mut state = ConversationState::new();

    let reply = h.agent.handle_turn("simplify", &mut state).await;
    assert_eq!(reply, NO_RESULT_REPLY);
}

#[tokio::test]
async fn explain_bullets_previous_answer() {
    let h = harness(
        Arc::new(StaticSource::answering(
            "wiki",
            "Water is vital. Oceans hold most water. Ice caps store the rest.",
        )),
        Arc::new(StaticSource::empty("web")),
        Arc::new(StaticSource::empty("clock")),
    );
    let mut state = ConversationState::new();

    h.agent.handle_turn("tell me about water", &mut state).await;
    let explained = h.agent.handle_turn("explain", &mut state).await;

    assert_eq!(explained.lines().count(), 3);
    assert!(explained.lines().all(|l| l.starts_with("- ")));
}

#[tokio::test]
async fn ambiguous_lookup_surfaces_candidates() {
    let web = Arc::new(StaticSource::answering("web", "never reached"));
    let bindings = SourceBindings {
        encyclopedia: Arc::new(AmbiguousSource::new(
            "wiki",
            vec!["Mercury (planet)".into(), "Mercury (element)".into()],
        )),
        web: web.clone(),
        weather: Arc::new(StaticSource::empty("weather")),
        clock: Arc::new(StaticSource::empty("clock")),
        llm: Arc::new(StaticSource::empty("llm")),
    };
    let agent = Agent::new(
        Interpreter::with_default_rules(),
        Planner::new(),
        Executor::new(bindings, Simplifier::identity(), Summarizer::leading()),
    );
    let mut state = ConversationState::new();

    let reply = agent.handle_turn("mercury", &mut state).await;
    assert!(reply.contains("too broad"));
    assert!(reply.contains("Mercury (planet)"));
    assert_eq!(web.call_count(), 0);
    // The clarification is a real reply and is stored.
    assert_eq!(state.last_response, reply);
}

#[tokio::test]
async fn exhausted_chain_returns_fixed_reply_and_clears_state() {
    let h = harness(
        Arc::new(StaticSource::empty("wiki")),
        Arc::new(StaticSource::empty("web")),
        Arc::new(StaticSource::empty("clock")),
    );
    let mut state = ConversationState::new();
    state.record("stale");

    let reply = h.agent.handle_turn("unknown thing", &mut state).await;
    assert_eq!(reply, NO_RESULT_REPLY);
    assert_eq!(state.last_response, "");
    // Both fallback steps were tried.
    assert_eq!(h.wiki.call_count(), 1);
    assert_eq!(h.web.call_count(), 1);
}

#[tokio::test]
async fn define_falls_back_to_language_model() {
    let llm = Arc::new(StaticSource::answering("llm", "Entropy measures disorder."));
    let wiki = Arc::new(StaticSource::empty("wiki"));
    let bindings = SourceBindings {
        encyclopedia: wiki.clone(),
        web: Arc::new(StaticSource::answering("web", "never used for define")),
        weather: Arc::new(StaticSource::empty("weather")),
        clock: Arc::new(StaticSource::empty("clock")),
        llm: llm.clone(),
    };
    let agent = Agent::new(
        Interpreter::with_default_rules(),
        Planner::new(),
        Executor::new(bindings, Simplifier::identity(), Summarizer::leading()),
    );
    let mut state = ConversationState::new();

    let reply = agent.handle_turn("define entropy", &mut state).await;
    assert_eq!(reply, "Entropy measures disorder.");
    assert_eq!(wiki.call_count(), 1);
    assert_eq!(llm.call_count(), 1);
    assert_eq!(llm.queries.lock().unwrap().as_slice(), ["entropy"]);
}
