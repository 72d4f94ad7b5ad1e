//! Lexical simplification via a static substitution table.
//!
//! The table maps a normalized difficult word to a simpler replacement
//! and is immutable after loading. Simplification is a pure, single-pass
//! rewrite: substituted output is not re-scanned, so a table with cycles
//! oscillates under repeated application rather than looping here.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

use csv_async::AsyncReaderBuilder;
use futures::StreamExt;
use tokio::fs::File;

use crate::error::AgentError;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z']*").unwrap());

/// Difficult-word → simpler-word mapping.
///
/// Keys are normalized on insert: trimmed, lowercased, trailing digits
/// stripped (WordNet lemma rows arrive as e.g. `ubiquitous3`).
/// Replacements have lemma underscores turned into spaces. Self-maps
/// are dropped.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    entries: HashMap<String, String>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<I, S, T>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut table = Self::new();
        for (difficult, simple) in rows {
            table.insert(difficult.as_ref(), simple.as_ref());
        }
        table
    }

    pub fn insert(&mut self, difficult: &str, simple: &str) {
        let key = normalize_key(difficult);
        let replacement = simple.trim().replace('_', " ");
        if key.is_empty() || replacement.is_empty() || key == replacement.to_lowercase() {
            return;
        }
        self.entries.insert(key, replacement);
    }

    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .to_lowercase()
}

/// Load a two-column (difficult, simple) CSV into a table. Rows with
/// missing columns are skipped. The caller decides what a missing file
/// means; see the agent builder, which degrades to an empty table.
pub async fn load_substitution_table(path: &Path) -> Result<SubstitutionTable, AgentError> {
    let display = path.display().to_string();
    let file = File::open(path)
        .await
        .map_err(|e| AgentError::SubstitutionLoad {
            path: display.clone(),
            reason: e.to_string(),
        })?;

    let mut reader = AsyncReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .create_reader(file);

    let mut table = SubstitutionTable::new();
    let mut records = reader.records();
    while let Some(record) = records.next().await {
        let record = record.map_err(|e| AgentError::SubstitutionLoad {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        if let (Some(difficult), Some(simple)) = (record.get(0), record.get(1)) {
            table.insert(difficult, simple);
        }
    }
    Ok(table)
}

/// Word-by-word rewriter over a substitution table.
pub struct Simplifier {
    table: SubstitutionTable,
}

impl Simplifier {
    pub fn new(table: SubstitutionTable) -> Self {
        Self { table }
    }

    /// With no table data this is the identity function.
    pub fn identity() -> Self {
        Self::new(SubstitutionTable::new())
    }

    pub fn is_identity(&self) -> bool {
        self.table.is_empty()
    }

    /// Rewrite each word that has a table entry, re-applying the
    /// original token's leading capitalization. Punctuation and
    /// whitespace pass through untouched.
    pub fn simplify(&self, text: &str) -> String {
        if self.table.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in WORD_RE.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            let token = m.as_str();
            match self.table.lookup(token) {
                Some(replacement) => out.push_str(&match_capitalization(token, replacement)),
                None => out.push_str(token),
            }
            last = m.end();
        }
        out.push_str(&text[last..]);
        out
    }
}

fn match_capitalization(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(|c| c.is_uppercase());
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(rows: &[(&str, &str)]) -> SubstitutionTable {
        SubstitutionTable::from_rows(rows.iter().copied())
    }

    #[test]
    fn test_capitalization_preserved() {
        let simplifier = Simplifier::new(table(&[("quick", "fast")]));
        assert_eq!(simplifier.simplify("The Quick Fox"), "The Fast Fox");
        assert_eq!(simplifier.simplify("the quick fox"), "the fast fox");
    }

    #[test]
    fn test_empty_table_is_identity() {
        let simplifier = Simplifier::identity();
        for text in ["", "anything at all!", "The Quick Fox"] {
            assert_eq!(simplifier.simplify(text), text);
        }
    }

    #[test]
    fn test_punctuation_passes_through() {
        let simplifier = Simplifier::new(table(&[("ubiquitous", "common")]));
        assert_eq!(
            simplifier.simplify("A ubiquitous, truly ubiquitous idea."),
            "A common, truly common idea."
        );
    }

    #[test]
    fn test_key_normalization_strips_trailing_digits_and_case() {
        let t = table(&[("Ubiquitous3", "common")]);
        assert_eq!(t.lookup("ubiquitous"), Some("common"));
        assert_eq!(t.lookup("Ubiquitous"), Some("common"));
    }

    #[test]
    fn test_lemma_underscores_become_spaces() {
        let simplifier = Simplifier::new(table(&[("automobile", "motor_car")]));
        assert_eq!(simplifier.simplify("an automobile"), "an motor car");
    }

    #[test]
    fn test_self_maps_dropped() {
        let t = table(&[("word", "Word")]);
        assert!(t.is_empty());
    }

    #[test]
    fn test_single_pass_no_chaining() {
        // a→b and b→c: one pass rewrites a to b, never on to c.
        let simplifier = Simplifier::new(table(&[("big", "large"), ("large", "huge")]));
        assert_eq!(simplifier.simplify("big"), "large");
    }

    #[test]
    fn test_empty_input() {
        let simplifier = Simplifier::new(table(&[("quick", "fast")]));
        assert_eq!(simplifier.simplify(""), "");
    }

    #[tokio::test]
    async fn test_load_from_csv() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ubiquitous,common").unwrap();
        writeln!(file, "Quick2,fast").unwrap();
        writeln!(file, "lonely-column").unwrap();
        file.flush().unwrap();

        let t = load_substitution_table(file.path()).await.unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.lookup("ubiquitous"), Some("common"));
        assert_eq!(t.lookup("quick"), Some("fast"));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_an_error() {
        let err = load_substitution_table(Path::new("/nonexistent/words.csv"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("substitution"));
    }
}
