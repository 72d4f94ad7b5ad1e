//! Extractive bullet-point summarization.
//!
//! Two ranking strategies, chosen once at construction and cached for
//! the life of the summarizer:
//!
//! - `Centrality`: sentences are ranked by degree centrality over a
//!   TF-IDF cosine-similarity graph (the LexRank family), then the top
//!   `n` are emitted in their original order. Needs a stopword list.
//! - `Leading`: the first `n` sentences verbatim. Used when the
//!   stopword resource is unavailable.
//!
//! Both paths produce identical formatting (one `- ` bullet per line),
//! so callers cannot tell which ran except by content quality.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::sentences::split_sentences;

/// Sentence count used by `explain`.
const EXPLAIN_SENTENCES: usize = 5;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9']+").unwrap());

const DEFAULT_ENGLISH: &str = "a\nan\nthe\nand\nor\nbut\nif\nthen\nso\nof\nto\nin\non\nat\nby\n\
for\nwith\nabout\nfrom\nas\ninto\nover\nunder\nis\nare\nwas\nwere\nbe\nbeen\nbeing\nhave\nhas\n\
had\ndo\ndoes\ndid\nwill\nwould\nshall\nshould\ncan\ncould\nmay\nmight\nmust\nnot\nno\nnor\n\
this\nthat\nthese\nthose\nit\nits\nhe\nshe\nthey\nthem\nhis\nher\ntheir\nwe\nyou\nyour\ni\nme\n\
my\nwhat\nwhich\nwho\nwhom\nwhere\nwhen\nwhy\nhow\nall\nany\nboth\neach\nmore\nmost\nsome\nsuch\n\
only\nown\nsame\nthan\ntoo\nvery\njust\nthere\nhere";

/// Stopword list backing the centrality strategy.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Parse one stopword per line; blank lines and `#` comments are
    /// skipped.
    pub fn from_text(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// The built-in English list, used when no stopword file is
    /// configured.
    pub fn default_english() -> Self {
        Self::from_text(DEFAULT_ENGLISH)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

enum RankingStrategy {
    Centrality(Stopwords),
    Leading,
}

pub struct Summarizer {
    strategy: RankingStrategy,
}

impl Summarizer {
    /// Centrality ranking, backed by the given stopword resource.
    pub fn with_stopwords(stopwords: Stopwords) -> Self {
        Self {
            strategy: RankingStrategy::Centrality(stopwords),
        }
    }

    /// Degraded first-n-sentences ranking.
    pub fn leading() -> Self {
        Self {
            strategy: RankingStrategy::Leading,
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        match self.strategy {
            RankingStrategy::Centrality(_) => "centrality",
            RankingStrategy::Leading => "leading",
        }
    }

    /// Reduce `text` to at most `n` bullet lines. Never returns more
    /// lines than the text has sentences; `n = 0` yields an empty
    /// string.
    pub fn summarize(&self, text: &str, n: usize) -> String {
        let sentences = split_sentences(text);
        if n == 0 || sentences.is_empty() {
            return String::new();
        }
        let n = n.min(sentences.len());

        let picked: Vec<usize> = match &self.strategy {
            RankingStrategy::Leading => (0..n).collect(),
            RankingStrategy::Centrality(stopwords) => rank_by_centrality(&sentences, stopwords, n),
        };

        picked
            .into_iter()
            .map(|i| format!("- {}", sentences[i]))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A longer extractive summary of the same shape.
    pub fn explain(&self, text: &str) -> String {
        self.summarize(text, EXPLAIN_SENTENCES)
    }
}

/// Rank sentences by summed cosine similarity to every other sentence
/// (degree centrality), returning the indices of the `n` most central
/// ones in original order.
fn rank_by_centrality(sentences: &[String], stopwords: &Stopwords, n: usize) -> Vec<usize> {
    let vectors: Vec<HashMap<String, f64>> = {
        // Document frequency over content words.
        let token_sets: Vec<HashSet<String>> = sentences
            .iter()
            .map(|s| tokenize(s, stopwords).into_iter().collect())
            .collect();
        let mut df: HashMap<&str, usize> = HashMap::new();
        for set in &token_sets {
            for token in set {
                *df.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let total = sentences.len() as f64;
        sentences
            .iter()
            .map(|s| {
                let mut tf: HashMap<String, f64> = HashMap::new();
                for token in tokenize(s, stopwords) {
                    *tf.entry(token).or_insert(0.0) += 1.0;
                }
                for (token, weight) in tf.iter_mut() {
                    let d = df.get(token.as_str()).copied().unwrap_or(1) as f64;
                    *weight *= 1.0 + (total / d).ln();
                }
                tf
            })
            .collect()
    };

    let mut scores = vec![0.0f64; sentences.len()];
    for i in 0..sentences.len() {
        for j in (i + 1)..sentences.len() {
            let sim = cosine_similarity(&vectors[i], &vectors[j]);
            scores[i] += sim;
            scores[j] += sim;
        }
    }

    let mut order: Vec<usize> = (0..sentences.len()).collect();
    // Highest score first; ties broken by original position.
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut picked: Vec<usize> = order.into_iter().take(n).collect();
    picked.sort_unstable();
    picked
}

fn tokenize(sentence: &str, stopwords: &Stopwords) -> Vec<String> {
    let lower = sentence.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .filter(|t| !stopwords.contains(t))
        .collect()
}

fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(token, wa)| b.get(token).map(|wb| wa * wb))
        .sum();
    if dot == 0.0 {
        return 0.0;
    }
    let norm_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();
    dot / (norm_a * norm_b)
}
