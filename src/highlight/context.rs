//! Context snippets around keyword matches.
//!
//! Long fields such as an article body or its comments are shown as short
//! snippets: a bounded window of characters before and after each match,
//! snapped so that no partial word is shown at either edge.
//!
//! # Examples
//!
//! ```
//! use archivist::highlight::context::extract_contexts;
//!
//! let text = "the treaty of Westphalia ended the war in 1648";
//! let snippets = extract_contexts(text, &["westphalia"], 8);
//! assert_eq!(snippets, vec!["of Westphalia ended".to_string()]);
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize_with_mapping;
use crate::highlight::matcher::KeywordMatcher;
use crate::highlight::renderer::{Highlighter, escape_html};

/// Default number of characters shown on each side of a match.
pub const DEFAULT_CONTEXT_CHARS: usize = 50;

/// Configuration for context extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Maximum number of characters taken before and after each match.
    pub context_chars: usize,
    /// Maximum number of snippets per field. `None` keeps all of them.
    pub max_snippets: Option<usize>,
    /// Marker added where a snippet is cut from a longer text.
    pub ellipsis: Option<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            context_chars: DEFAULT_CONTEXT_CHARS,
            max_snippets: None,
            ellipsis: None,
        }
    }
}

impl ContextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context_chars(mut self, context_chars: usize) -> Self {
        self.context_chars = context_chars;
        self
    }

    pub fn max_snippets(mut self, max_snippets: usize) -> Self {
        self.max_snippets = Some(max_snippets);
        self
    }

    pub fn ellipsis(mut self, ellipsis: String) -> Self {
        self.ellipsis = Some(ellipsis);
        self
    }
}

/// Byte offsets of one snippet in the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindow {
    /// Start of the leading context.
    pub start: usize,
    /// Start of the matched text.
    pub match_start: usize,
    /// End of the matched text.
    pub match_end: usize,
    /// End of the trailing context.
    pub end: usize,
}

impl ContextWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn match_range(&self) -> Range<usize> {
        self.match_start..self.match_end
    }

    /// Returns true if the snippet does not reach the start of the text.
    pub fn is_cut_before(&self) -> bool {
        self.start > 0
    }

    /// Returns true if the snippet does not reach the end of `text`.
    pub fn is_cut_after(&self, text: &str) -> bool {
        self.end < text.len()
    }
}

/// Extracts context snippets around keyword matches.
#[derive(Debug, Clone, Default)]
pub struct ContextExtractor {
    config: ContextConfig,
}

impl ContextExtractor {
    pub fn new(config: ContextConfig) -> Self {
        ContextExtractor { config }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Compute the snippet window for each match range of the original text.
    ///
    /// Ranges must lie on character boundaries of `text`; any other range is
    /// skipped.
    pub fn windows(&self, text: &str, ranges: &[Range<usize>]) -> Vec<ContextWindow> {
        let limit = self.config.max_snippets.unwrap_or(usize::MAX);

        ranges
            .iter()
            .filter(|r| {
                r.start < r.end
                    && r.end <= text.len()
                    && text.is_char_boundary(r.start)
                    && text.is_char_boundary(r.end)
            })
            .take(limit)
            .map(|r| ContextWindow {
                start: leading_start(text, r.start, self.config.context_chars),
                match_start: r.start,
                match_end: r.end,
                end: trailing_end(text, r.end, self.config.context_chars),
            })
            .collect()
    }

    /// Snippets around every keyword match of `text`.
    pub fn extract(&self, text: &str, matcher: &KeywordMatcher) -> Vec<String> {
        self.snippets(text, &self.match_ranges(text, matcher), None)
    }

    /// Snippets around every keyword match with the match itself highlighted.
    pub fn extract_highlighted(
        &self,
        text: &str,
        matcher: &KeywordMatcher,
        highlighter: &Highlighter,
    ) -> Vec<String> {
        self.snippets(text, &self.match_ranges(text, matcher), Some(highlighter))
    }

    /// Snippets around already mapped match ranges of the original text.
    pub fn snippets(
        &self,
        text: &str,
        ranges: &[Range<usize>],
        highlighter: Option<&Highlighter>,
    ) -> Vec<String> {
        self.windows(text, ranges)
            .iter()
            .map(|window| self.render(text, window, highlighter))
            .collect()
    }

    fn match_ranges(&self, text: &str, matcher: &KeywordMatcher) -> Vec<Range<usize>> {
        if text.is_empty() || matcher.is_empty() {
            return Vec::new();
        }
        matcher.find_original_ranges(&normalize_with_mapping(text))
    }

    fn render(&self, text: &str, window: &ContextWindow, highlighter: Option<&Highlighter>) -> String {
        let mut snippet = String::new();
        // The ellipsis is text too once the highlighter escapes its input.
        let ellipsis = self.config.ellipsis.as_deref().map(|ellipsis| {
            match highlighter {
                Some(h) if h.config().escape_html => escape_html(ellipsis),
                _ => ellipsis.to_string(),
            }
        });

        if let Some(ellipsis) = &ellipsis
            && window.is_cut_before()
        {
            snippet.push_str(ellipsis);
        }

        match highlighter {
            Some(highlighter) => {
                let local = window.match_start - window.start..window.match_end - window.start;
                snippet.push_str(&highlighter.highlight(&text[window.range()], &[local]));
            }
            None => snippet.push_str(&text[window.range()]),
        }

        if let Some(ellipsis) = &ellipsis
            && window.is_cut_after(text)
        {
            snippet.push_str(ellipsis);
        }

        snippet
    }
}

/// Start of the leading context for a match starting at `match_start`.
///
/// Takes up to `context_chars` characters. The window is left alone when it
/// starts the text, when its first character is whitespace, or when the
/// character just before it is whitespace: in all three cases it already
/// begins on a word boundary. Otherwise it begins in the middle of a word and
/// is moved forward past its first whitespace; with no whitespace inside it
/// the full window is kept.
fn leading_start(text: &str, match_start: usize, context_chars: usize) -> usize {
    let start = if context_chars == 0 {
        match_start
    } else {
        text[..match_start]
            .char_indices()
            .rev()
            .take(context_chars)
            .last()
            .map_or(match_start, |(i, _)| i)
    };

    let window = &text[start..match_start];
    let starts_mid_word = start > 0
        && !window.starts_with(char::is_whitespace)
        && !text[..start].ends_with(char::is_whitespace);

    if !starts_mid_word {
        return start;
    }

    match window.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((i, c)) => start + i + c.len_utf8(),
        None => start,
    }
}

/// End of the trailing context for a match ending at `match_end`.
///
/// Symmetric to [`leading_start`]: the window is left alone when it reaches
/// the end of the text, ends with whitespace, or is followed by whitespace.
/// Otherwise it ends in the middle of a word and is cut back to its last
/// whitespace.
fn trailing_end(text: &str, match_end: usize, context_chars: usize) -> usize {
    let rest = &text[match_end..];
    let end = rest
        .char_indices()
        .nth(context_chars)
        .map_or(text.len(), |(i, _)| match_end + i);

    let window = &text[match_end..end];
    let ends_mid_word = end < text.len()
        && !window.ends_with(char::is_whitespace)
        && !text[end..].starts_with(char::is_whitespace);

    if !ends_mid_word {
        return end;
    }

    match window.rfind(char::is_whitespace) {
        Some(i) => match_end + i,
        None => end,
    }
}

/// Snippets of `text` around every match of `normalized_keywords`, with
/// `context_chars` characters of context on each side.
pub fn extract_contexts<S: AsRef<str>>(
    text: &str,
    normalized_keywords: &[S],
    context_chars: usize,
) -> Vec<String> {
    let matcher =
        KeywordMatcher::from_normalized(normalized_keywords.iter().map(|k| k.as_ref().to_string()));
    ContextExtractor::new(ContextConfig::new().context_chars(context_chars)).extract(text, &matcher)
}
