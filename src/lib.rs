//! # Archivist
//!
//! Keyword search, highlighting and snippet extraction for a personal
//! article archive.
//!
//! ## Features
//!
//! - Diacritic and case folding with Turkish aware rules
//! - Position-preserving normalization, so matches in folded text are
//!   highlighted in the original text
//! - Literal multi-keyword matching, safe against regex metacharacters
//! - Well-formed `<mark>` highlighting and word-snapped context snippets
//! - Filtering of article lists by keywords, category, owner, tags and dates
//!
//! ## Example
//!
//! ```
//! use archivist::prelude::*;
//!
//! let matcher = KeywordMatcher::new(["istanbul"]);
//! let text = "İstanbul'da bir gün";
//! let ranges = matcher.find_original_ranges(&normalize_with_mapping(text));
//!
//! assert_eq!(highlight(text, &ranges), "<mark>İstanbul</mark>'da bir gün");
//! ```

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod highlight;
pub mod search;

pub mod prelude {
    pub use crate::analysis::{NormalizedText, normalize, normalize_with_mapping};
    pub use crate::document::{ArticleField, ArticleRecord, html_to_text};
    pub use crate::error::{ArchivistError, Result};
    pub use crate::highlight::{
        ContextConfig, ContextExtractor, HighlightConfig, Highlighter, KeywordMatcher,
        extract_contexts, find_matches, highlight,
    };
    pub use crate::search::{
        ArticleFilter, ArticleHit, ArticleSearcher, KeywordSet, MatchMode, SearchConfig,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
