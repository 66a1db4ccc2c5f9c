//! Diacritic and case folding normalization.
//!
//! The normalizer walks the input one character at a time, replaces every
//! character found in the [folding table](crate::analysis::folding) with its
//! ASCII base form and lower-cases the result. Two flavours exist:
//!
//! - [`normalize`] returns only the folded string.
//! - [`normalize_with_mapping`] also records where each normalized byte came
//!   from, so that matches found in the folded text can be highlighted in the
//!   original text.
//!
//! Both produce exactly the same string for the same input.
//!
//! # Examples
//!
//! ```
//! use archivist::analysis::normalizer::{normalize, normalize_with_mapping};
//!
//! assert_eq!(normalize("İstanbul Çalışma ğüşöiç"), "istanbul calisma gusoic");
//!
//! let result = normalize_with_mapping("Æther");
//! assert_eq!(result.as_str(), "aether");
//! assert_eq!(result.index_map().len(), result.len());
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::analysis::folding::fold_char;
use crate::analysis::offset::{SourceSpan, map_range};
use crate::highlight::matcher::MatchRange;

/// A normalized string together with its index map back into the original.
///
/// `index_map[i]` is the span of the original character that produced byte
/// `i` of `normalized`, so `index_map.len() == normalized.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedText {
    normalized: String,
    index_map: Vec<SourceSpan>,
    original_len: usize,
}

impl NormalizedText {
    /// The normalized string.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// The per-byte index map into the original text.
    pub fn index_map(&self) -> &[SourceSpan] {
        &self.index_map
    }

    /// Byte length of the original text.
    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Byte length of the normalized text.
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Translate a match found in the normalized text to the original text.
    pub fn to_original(&self, range: &MatchRange) -> Range<usize> {
        self.map(range.start, range.end)
    }

    /// Translate a raw `[start, end)` normalized range to the original text.
    pub fn map(&self, normalized_start: usize, normalized_end: usize) -> Range<usize> {
        map_range(
            &self.index_map,
            normalized_start,
            normalized_end,
            self.original_len,
        )
    }

    /// Consume the result, returning the normalized string and its index map.
    pub fn into_parts(self) -> (String, Vec<SourceSpan>) {
        (self.normalized, self.index_map)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

/// Fold diacritics and case of `text`.
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());

    for c in text.chars() {
        match fold_char(c) {
            Some(replacement) => normalized.push_str(replacement),
            None => {
                for lower in c.to_lowercase() {
                    match fold_char(lower) {
                        Some(replacement) => normalized.push_str(replacement),
                        None => normalized.push(lower),
                    }
                }
            }
        }
    }

    normalized
}

/// Normalize an optional field. An absent value is treated as empty text.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Fold diacritics and case of `text`, recording the original span of every
/// normalized byte.
pub fn normalize_with_mapping(text: &str) -> NormalizedText {
    let mut normalized = String::with_capacity(text.len());
    let mut index_map = Vec::with_capacity(text.len());

    for (start, c) in text.char_indices() {
        let span = SourceSpan::new(start, start + c.len_utf8());

        match fold_char(c) {
            Some(replacement) => {
                normalized.push_str(replacement);
                index_map.extend(std::iter::repeat_n(span, replacement.len()));
            }
            None => {
                // Lower-casing can produce a foldable letter, e.g. 'Ă' -> 'ă'.
                for lower in c.to_lowercase() {
                    let before = normalized.len();
                    match fold_char(lower) {
                        Some(replacement) => normalized.push_str(replacement),
                        None => normalized.push(lower),
                    }
                    index_map.extend(std::iter::repeat_n(span, normalized.len() - before));
                }
            }
        }
    }

    NormalizedText {
        normalized,
        index_map,
        original_len: text.len(),
    }
}
