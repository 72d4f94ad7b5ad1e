//! Sentence boundary detection.
//!
//! A small scanner, not a linguistic model: a run of `.`/`!`/`?` ends a
//! sentence when followed by whitespace and an uppercase letter, digit,
//! or opening quote. Common abbreviations and single-letter initials
//! are exempted so "Dr. Smith" stays in one piece.

/// Lowercased tokens whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "approx", "dept", "fig",
    "e.g", "i.e", "cf", "al",
];

/// Split text into trimmed sentences, preserving original order and the
/// terminating punctuation of each sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (idx, c) = chars[i];

        if c == '\n' {
            push_trimmed(&mut sentences, &text[start..idx]);
            start = idx + c.len_utf8();
            i += 1;
            continue;
        }

        if matches!(c, '.' | '!' | '?') {
            // Consume the whole terminator run ("...", "?!").
            let mut j = i;
            while j + 1 < chars.len() && matches!(chars[j + 1].1, '.' | '!' | '?') {
                j += 1;
            }
            let end = chars[j].0 + chars[j].1.len_utf8();

            if is_boundary(&chars, j) && !(c == '.' && i == j && is_abbreviation(&text[start..idx]))
            {
                push_trimmed(&mut sentences, &text[start..end]);
                start = end;
            }
            i = j + 1;
            continue;
        }

        i += 1;
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

/// A terminator run at `chars[j]` ends a sentence if it sits at the end
/// of the text, or is followed by whitespace and a plausible sentence
/// opener.
fn is_boundary(chars: &[(usize, char)], j: usize) -> bool {
    let Some(&(_, next)) = chars.get(j + 1) else {
        return true;
    };
    if !next.is_whitespace() {
        return false;
    }
    match chars[j + 1..].iter().find(|(_, ch)| !ch.is_whitespace()) {
        None => true,
        Some(&(_, ch)) => ch.is_uppercase() || ch.is_ascii_digit() || matches!(ch, '"' | '\'' | '('),
    }
}

fn is_abbreviation(before: &str) -> bool {
    let token = before
        .trim_end()
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("");
    let token = token.trim_start_matches(|ch: char| !ch.is_alphabetic());

    // Single capital letters are initials ("J. Smith").
    let mut alpha = token.chars().filter(|ch| ch.is_alphabetic());
    if let (Some(first), None) = (alpha.next(), alpha.next()) {
        if first.is_uppercase() {
            return true;
        }
    }

    ABBREVIATIONS.contains(&token.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_split() {
        let sents = split_sentences("First sentence. Second one! Third?");
        assert_eq!(sents, vec!["First sentence.", "Second one!", "Third?"]);
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let sents = split_sentences("Dr. Smith arrived. He was late.");
        assert_eq!(sents, vec!["Dr. Smith arrived.", "He was late."]);
    }

    #[test]
    fn test_initials_do_not_split() {
        let sents = split_sentences("J. R. Tolkien wrote it. It sold well.");
        assert_eq!(sents.len(), 2);
        assert_eq!(sents[0], "J. R. Tolkien wrote it.");
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        let sents = split_sentences("Pi is 3.14 roughly. Tau is larger.");
        assert_eq!(sents, vec!["Pi is 3.14 roughly.", "Tau is larger."]);
    }

    #[test]
    fn test_newlines_are_boundaries() {
        let sents = split_sentences("line one\nline two");
        assert_eq!(sents, vec!["line one", "line two"]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n  ").is_empty());
    }

    #[test]
    fn test_unterminated_tail_kept() {
        let sents = split_sentences("Complete sentence. Trailing fragment");
        assert_eq!(sents, vec!["Complete sentence.", "Trailing fragment"]);
    }

    #[test]
    fn test_lowercase_follower_does_not_split() {
        // Conservative: a period followed by a lowercase word is assumed
        // to be mid-sentence punctuation.
        let sents = split_sentences("See fig. 2 in ch. two for details.");
        assert_eq!(sents.len(), 1);
    }
}
