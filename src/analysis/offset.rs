//! Mapping between normalized and original text offsets.
//!
//! Folding can expand a character (`æ -> ae`) or delete it (`' -> ""`), so a
//! byte offset in the normalized text cannot be turned into an original offset
//! by arithmetic. Instead the normalizer records, for every normalized byte,
//! the [`SourceSpan`] of the original character that produced it, and
//! [`map_range`] reads that index map.
//!
//! # Examples
//!
//! ```
//! use archivist::analysis::normalizer::normalize_with_mapping;
//! use archivist::analysis::offset::map_range;
//!
//! let original = "Çağrı Ünal";
//! let normalized = normalize_with_mapping(original);
//! assert_eq!(normalized.as_str(), "cagri unal");
//!
//! // "unal" sits at bytes 6..10 of the normalized text.
//! let range = map_range(normalized.index_map(), 6, 10, original.len());
//! assert_eq!(&original[range], "Ünal");
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Byte span of a single original character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Byte offset of the character in the original text.
    pub start: usize,
    /// Byte offset just past the character.
    pub end: usize,
}

impl SourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Convert a `[normalized_start, normalized_end)` range into the equivalent
/// range of the original text.
///
/// An empty index map or an empty range yields `0..0`. The end is capped to
/// `original_len`. Indices past the end of the map are clamped to its last
/// entry; callers are expected to pass ranges found in the matching
/// normalized text.
pub fn map_range(
    index_map: &[SourceSpan],
    normalized_start: usize,
    normalized_end: usize,
    original_len: usize,
) -> Range<usize> {
    if index_map.is_empty() || normalized_end <= normalized_start {
        return 0..0;
    }

    let last = index_map.len() - 1;
    let first_span = index_map[normalized_start.min(last)];
    let last_span = index_map[(normalized_end - 1).min(last)];

    let start = first_span.start.min(original_len);
    let end = last_span.end.min(original_len);

    start..end.max(start)
}
