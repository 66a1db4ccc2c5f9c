//! The active keyword list of a search session.

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::error::{ArchivistError, Result};
use crate::highlight::matcher::KeywordMatcher;

/// Keywords shorter than this many characters are rejected.
pub const MIN_KEYWORD_LEN: usize = 2;

/// An ordered set of search keywords.
///
/// Keywords are kept as typed (trimmed) for display. Two keywords that
/// normalize to the same form are considered duplicates.
///
/// # Examples
///
/// ```
/// use archivist::search::keyword::KeywordSet;
///
/// let mut keywords = KeywordSet::new();
/// assert!(keywords.insert("Çay").unwrap());
/// assert!(!keywords.insert("cay").unwrap());
/// assert!(keywords.insert("x").is_err());
/// assert_eq!(keywords.normalized(), vec!["cay".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    keywords: Vec<String>,
    min_len: usize,
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::with_min_len(MIN_KEYWORD_LEN)
    }

    /// Create an empty set with a custom minimum keyword length.
    pub fn with_min_len(min_len: usize) -> Self {
        KeywordSet {
            keywords: Vec::new(),
            min_len: min_len.max(1),
        }
    }

    /// Build a set from a list of keywords, failing on the first invalid one.
    pub fn try_from_iter<I, S>(keywords: I, min_len: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::with_min_len(min_len);
        for keyword in keywords {
            set.insert(keyword.as_ref())?;
        }
        Ok(set)
    }

    /// Add a keyword.
    ///
    /// Returns `Ok(false)` if an equivalent keyword is already present and
    /// an error if the keyword is shorter than the minimum length.
    pub fn insert(&mut self, keyword: &str) -> Result<bool> {
        let keyword = keyword.trim();
        let len = keyword.chars().count();

        if len < self.min_len {
            return Err(ArchivistError::keyword(format!(
                "keyword {keyword:?} must be at least {} characters long",
                self.min_len
            )));
        }

        let normalized = normalize(keyword);
        if normalized.is_empty() {
            return Err(ArchivistError::keyword(format!(
                "keyword {keyword:?} contains nothing searchable"
            )));
        }
        if self.position(&normalized).is_some() {
            return Ok(false);
        }

        self.keywords.push(keyword.to_string());
        Ok(true)
    }

    /// Remove the keyword equivalent to `keyword`. Returns true if one was removed.
    pub fn remove(&mut self, keyword: &str) -> bool {
        match self.position(&normalize(keyword.trim())) {
            Some(index) => {
                self.keywords.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.keywords.clear();
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// The keywords as typed.
    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// The normalized form of every keyword.
    pub fn normalized(&self) -> Vec<String> {
        self.keywords.iter().map(|k| normalize(k)).collect()
    }

    /// Compile the keywords into a matcher.
    pub fn matcher(&self) -> KeywordMatcher {
        KeywordMatcher::from_normalized(self.normalized())
    }

    fn position(&self, normalized: &str) -> Option<usize> {
        self.keywords.iter().position(|k| normalize(k) == normalized)
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.iter()
    }
}
