//! Keyword matching over normalized text.
//!
//! Every keyword is folded with the same normalizer as the searched text,
//! escaped so that it is always treated as a literal, and compiled into its
//! own case-insensitive pattern. Matches of different keywords are reported
//! independently, even when they overlap, and merged into one list sorted by
//! start position.
//!
//! # Examples
//!
//! ```
//! use archivist::analysis::normalize;
//! use archivist::highlight::matcher::KeywordMatcher;
//!
//! let matcher = KeywordMatcher::new(["fox", "quick"]);
//! let matches = matcher.find_matches(&normalize("The quick brown fox"));
//!
//! assert_eq!(matches.len(), 2);
//! assert_eq!((matches[0].start, matches[0].end), (4, 9));
//! assert_eq!((matches[1].start, matches[1].end), (16, 19));
//! ```

use std::ops::Range;

use log::warn;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{NormalizedText, normalize};

/// A match in normalized text: the half-open byte range `[start, end)` and
/// the position of the keyword that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
    pub keyword: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize, keyword: usize) -> Self {
        MatchRange {
            start,
            end,
            keyword,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A compiled set of keywords.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    /// Normalized keywords, in the order they were supplied.
    keywords: Vec<String>,
    /// Compiled patterns paired with the index of their keyword.
    patterns: Vec<(usize, Regex)>,
}

impl KeywordMatcher {
    /// Build a matcher from raw user keywords. Each keyword is normalized
    /// first; keywords that normalize to nothing never match.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_normalized(keywords.into_iter().map(|k| normalize(k.as_ref())))
    }

    /// Build a matcher from keywords that are already normalized.
    pub fn from_normalized<I, S>(normalized_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = normalized_keywords.into_iter().map(Into::into).collect();
        let mut patterns = Vec::with_capacity(keywords.len());

        for (index, keyword) in keywords.iter().enumerate() {
            if keyword.is_empty() {
                continue;
            }
            match compile_keyword(keyword) {
                Ok(pattern) => patterns.push((index, pattern)),
                Err(e) => warn!("skipping keyword {keyword:?}: {e}"),
            }
        }

        KeywordMatcher { keywords, patterns }
    }

    /// The normalized keywords of this matcher.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Number of keywords that can match, i.e. non-empty after normalization.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true when no keyword can ever match.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Find every occurrence of every keyword, sorted by start position.
    pub fn find_matches(&self, normalized_text: &str) -> Vec<MatchRange> {
        if normalized_text.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<MatchRange> = self
            .patterns
            .iter()
            .flat_map(|(keyword, pattern)| {
                pattern
                    .find_iter(normalized_text)
                    .map(move |m| MatchRange::new(m.start(), m.end(), *keyword))
            })
            .collect();

        matches.sort_by_key(|m| (m.start, m.end, m.keyword));
        matches
    }

    /// Find every occurrence and translate it to original text offsets.
    pub fn find_original_ranges(&self, text: &NormalizedText) -> Vec<Range<usize>> {
        self.find_matches(text.as_str())
            .iter()
            .map(|m| text.to_original(m))
            .filter(|r| !r.is_empty())
            .collect()
    }

    /// Returns true if at least one keyword occurs in the text.
    pub fn matches_any(&self, normalized_text: &str) -> bool {
        self.patterns
            .iter()
            .any(|(_, pattern)| pattern.is_match(normalized_text))
    }

    /// Returns true if every matchable keyword occurs in the text.
    ///
    /// A matcher without keywords matches nothing.
    pub fn matches_all(&self, normalized_text: &str) -> bool {
        !self.is_empty()
            && self
                .patterns
                .iter()
                .all(|(_, pattern)| pattern.is_match(normalized_text))
    }

    /// Indices of the keywords that occur in the text.
    pub fn matched_keywords(&self, normalized_text: &str) -> Vec<usize> {
        self.patterns
            .iter()
            .filter(|(_, pattern)| pattern.is_match(normalized_text))
            .map(|(keyword, _)| *keyword)
            .collect()
    }
}

/// Escape a keyword so that it only ever matches itself literally.
pub fn escape_keyword(keyword: &str) -> String {
    regex::escape(keyword)
}

fn compile_keyword(keyword: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(&escape_keyword(keyword))
        .case_insensitive(true)
        .build()
}

/// Find all matches of `normalized_keywords` in `normalized_text`, sorted by
/// start position. An empty keyword list yields no matches.
pub fn find_matches<S: AsRef<str>>(
    normalized_text: &str,
    normalized_keywords: &[S],
) -> Vec<MatchRange> {
    KeywordMatcher::from_normalized(normalized_keywords.iter().map(|k| k.as_ref().to_string()))
        .find_matches(normalized_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords_or_no_text() {
        let none: [&str; 0] = [];
        assert!(find_matches("some text", &none).is_empty());
        assert!(find_matches("", &["abc"]).is_empty());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let text = normalize("3.14 is pi, 3x14 is not");
        let matches = find_matches(&text, &["3.14"]);
        assert_eq!(matches, vec![MatchRange::new(0, 4, 0)]);

        for keyword in ["a+b", "(x)", "[y]", "^z$", "c|d", "e*", "f?", "{1}", "\\"] {
            let text = format!("before {keyword} after");
            let matches = find_matches(&text, &[keyword]);
            assert_eq!(matches.len(), 1, "{keyword}");
            assert_eq!(&text[matches[0].range()], keyword);
        }
    }

    #[test]
    fn test_sorted_regardless_of_keyword_order() {
        let matches = find_matches("the quick brown fox", &["fox", "quick"]);
        assert_eq!(
            matches,
            vec![MatchRange::new(4, 9, 1), MatchRange::new(16, 19, 0)]
        );
    }

    #[test]
    fn test_every_occurrence_is_found() {
        let matches = find_matches("abc abc abc", &["abc"]);
        let starts: Vec<usize> = matches.iter().map(|m| m.start).collect();
        assert_eq!(starts, vec![0, 4, 8]);
    }

    #[test]
    fn test_overlapping_keywords_are_both_reported() {
        let matches = find_matches("sunflower", &["sunflower", "flow"]);
        assert_eq!(
            matches,
            vec![MatchRange::new(0, 9, 0), MatchRange::new(3, 7, 1)]
        );
    }

    #[test]
    fn test_case_insensitive() {
        let matches = find_matches("Mixed CASE text", &["case"]);
        assert_eq!(matches, vec![MatchRange::new(6, 10, 0)]);
    }

    #[test]
    fn test_new_normalizes_keywords() {
        let matcher = KeywordMatcher::new(["Çalışma", "''"]);
        assert_eq!(matcher.keywords(), &["calisma".to_string(), String::new()]);

        let matches = matcher.find_matches(&normalize("Bu bir ÇALIŞMA."));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].keyword, 0);
    }

    #[test]
    fn test_original_ranges() {
        let original = "Gölcük'te göl";
        let text = crate::analysis::normalize_with_mapping(original);
        let matcher = KeywordMatcher::new(["gol"]);

        let ranges = matcher.find_original_ranges(&text);
        let found: Vec<&str> = ranges.iter().map(|r| &original[r.clone()]).collect();
        assert_eq!(found, vec!["Göl", "göl"]);
    }

    #[test]
    fn test_containment_helpers() {
        let matcher = KeywordMatcher::new(["alpha", "beta"]);
        assert!(matcher.matches_any("alpha only"));
        assert!(!matcher.matches_all("alpha only"));
        assert!(matcher.matches_all("beta and alpha"));
        assert_eq!(matcher.matched_keywords("beta"), vec![1]);

        let empty = KeywordMatcher::new(Vec::<String>::new());
        assert!(empty.is_empty());
        assert!(!empty.matches_any("anything"));
        assert!(!empty.matches_all("anything"));
    }
}
