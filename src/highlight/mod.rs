//! Keyword matching, highlighting and snippet extraction.
//!
//! All three stages work on original text offsets obtained through the
//! position-preserving normalizer, so the output always shows the text as it
//! was written, with its original casing and diacritics.

pub mod context;
pub mod matcher;
pub mod renderer;

pub use context::{ContextConfig, ContextExtractor, ContextWindow, extract_contexts};
pub use matcher::{KeywordMatcher, MatchRange, find_matches};
pub use renderer::{HighlightConfig, Highlighter, highlight, merge_ranges};
