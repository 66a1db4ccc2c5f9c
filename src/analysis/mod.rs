//! Text analysis module for Archivist.
//!
//! This module turns raw field text into the folded form keywords are matched
//! against: the static folding table, the position-preserving normalizer and the
//! offset mapper that relates normalized matches to the original text.

pub mod folding;
pub mod normalizer;
pub mod offset;

// Re-export commonly used types
pub use normalizer::{NormalizedText, normalize, normalize_opt, normalize_with_mapping};
pub use offset::{SourceSpan, map_range};
