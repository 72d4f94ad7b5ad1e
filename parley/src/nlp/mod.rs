//! Local text processing: sentence splitting, lexical simplification,
//! and extractive summarization. Everything in here is pure and
//! synchronous; the only I/O is the substitution-table loader.

pub mod sentences;
pub mod simplifier;
pub mod summarizer;

pub use simplifier::{Simplifier, SubstitutionTable};
pub use summarizer::{Stopwords, Summarizer};
