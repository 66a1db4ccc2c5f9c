//! Highlight markup rendering.

use std::ops::Range;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize_with_mapping;
use crate::highlight::matcher::KeywordMatcher;

/// Configuration for text highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// HTML tag to wrap highlighted terms (e.g., "mark", "em", "strong").
    pub tag: String,
    /// CSS class to add to highlight tags.
    pub css_class: Option<String>,
    /// Escape `<`, `>`, `&` and `"` in the text outside and inside the tags.
    pub escape_html: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            tag: "mark".to_string(),
            css_class: None,
            escape_html: false,
        }
    }
}

impl HighlightConfig {
    /// Create a new highlight configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTML tag for highlighting.
    pub fn tag(mut self, tag: String) -> Self {
        self.tag = tag;
        self
    }

    /// Set the CSS class for highlight tags.
    pub fn css_class(mut self, css_class: String) -> Self {
        self.css_class = Some(css_class);
        self
    }

    /// Enable or disable escaping of the surrounding text.
    pub fn escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    /// Build the opening HTML tag.
    pub fn opening_tag(&self) -> String {
        if let Some(ref css_class) = self.css_class {
            format!("<{} class=\"{}\">", self.tag, css_class)
        } else {
            format!("<{}>", self.tag)
        }
    }

    /// Build the closing HTML tag.
    pub fn closing_tag(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// Wraps ranges of original text in highlight tags.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    config: HighlightConfig,
}

impl Highlighter {
    /// Create a new highlighter.
    pub fn new(config: HighlightConfig) -> Self {
        Highlighter { config }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Wrap every range of `text` in the configured tag.
    ///
    /// Ranges are sorted and overlapping ranges are merged before
    /// insertion, so the output never contains nested or unbalanced tags.
    /// Ranges that fall outside the text or split a character are ignored.
    pub fn highlight(&self, text: &str, ranges: &[Range<usize>]) -> String {
        if text.is_empty() {
            return String::new();
        }

        let valid = ranges.iter().filter(|r| {
            let ok = r.start < r.end
                && r.end <= text.len()
                && text.is_char_boundary(r.start)
                && text.is_char_boundary(r.end);
            if !ok {
                debug!("ignoring highlight range {r:?} for text of {} bytes", text.len());
            }
            ok
        });
        let merged = merge_ranges(valid.cloned());

        if merged.is_empty() {
            return self.escape(text);
        }

        let opening = self.config.opening_tag();
        let closing = self.config.closing_tag();

        let (mut output, cursor) = merged.iter().fold(
            (
                String::with_capacity(text.len() + merged.len() * (opening.len() + closing.len())),
                0,
            ),
            |(mut output, cursor), range| {
                self.push_text(&mut output, &text[cursor..range.start]);
                output.push_str(&opening);
                self.push_text(&mut output, &text[range.clone()]);
                output.push_str(&closing);
                (output, range.end)
            },
        );
        self.push_text(&mut output, &text[cursor..]);

        output
    }

    /// Normalize `text`, find all keyword matches and highlight them.
    pub fn highlight_keywords(&self, text: &str, matcher: &KeywordMatcher) -> String {
        let normalized = normalize_with_mapping(text);
        let ranges = matcher.find_original_ranges(&normalized);
        self.highlight(text, &ranges)
    }

    fn escape(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        self.push_text(&mut output, text);
        output
    }

    fn push_text(&self, output: &mut String, text: &str) {
        if self.config.escape_html {
            push_escaped(output, text);
        } else {
            output.push_str(text);
        }
    }
}

/// Escape `<`, `>`, `&` and `"` so that `text` is shown literally in HTML.
pub fn escape_html(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    push_escaped(&mut output, text);
    output
}

fn push_escaped(output: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            _ => output.push(c),
        }
    }
}

/// Sort ranges and merge the ones that overlap. Ranges that only touch stay
/// separate.
pub fn merge_ranges<I>(ranges: I) -> Vec<Range<usize>>
where
    I: IntoIterator<Item = Range<usize>>,
{
    let mut ranges: Vec<Range<usize>> = ranges.into_iter().filter(|r| r.start < r.end).collect();
    ranges.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(current) if range.start < current.end => {
                current.end = current.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }

    merged
}

/// Highlight `ranges` of `text` with the default `<mark>` tag.
pub fn highlight(text: &str, ranges: &[Range<usize>]) -> String {
    Highlighter::default().highlight(text, ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_config() {
        let config = HighlightConfig::new()
            .tag("em".to_string())
            .css_class("hit".to_string());

        assert_eq!(config.opening_tag(), "<em class=\"hit\">");
        assert_eq!(config.closing_tag(), "</em>");
    }

    #[test]
    fn test_single_range() {
        assert_eq!(
            highlight("the quick brown fox", &[4..9]),
            "the <mark>quick</mark> brown fox"
        );
    }

    #[test]
    fn test_multiple_ranges_keep_offsets() {
        assert_eq!(
            highlight("the quick brown fox", &[16..19, 4..9]),
            "the <mark>quick</mark> brown <mark>fox</mark>"
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(highlight("", &[0..3]), "");
        assert_eq!(highlight("unchanged", &[]), "unchanged");
    }

    #[test]
    fn test_overlapping_ranges_are_merged() {
        assert_eq!(highlight("sunflower", &[0..9, 3..7]), "<mark>sunflower</mark>");
        assert_eq!(highlight("abcdef", &[0..3, 2..5]), "<mark>abcde</mark>f");
    }

    #[test]
    fn test_invalid_ranges_are_ignored() {
        // 'ö' occupies bytes 1..3
        assert_eq!(highlight("köy", &[2..3, 0..10]), "köy");
        assert_eq!(highlight("köy", &[1..3]), "k<mark>ö</mark>y");
    }

    #[test]
    fn test_merge_ranges() {
        let merged = merge_ranges(vec![10..15, 0..5, 3..8, 12..16, 20..20]);
        assert_eq!(merged, vec![0..8, 10..16]);
    }

    #[test]
    fn test_touching_ranges_stay_separate() {
        assert_eq!(merge_ranges(vec![2..4, 0..2]), vec![0..2, 2..4]);
        assert_eq!(highlight("abab", &[0..2, 2..4]), "<mark>ab</mark><mark>ab</mark>");

        let matcher = KeywordMatcher::new(["ab"]);
        assert_eq!(
            Highlighter::default().highlight_keywords("abab", &matcher),
            "<mark>ab</mark><mark>ab</mark>"
        );
    }

    #[test]
    fn test_escape_html() {
        let highlighter = Highlighter::new(HighlightConfig::new().escape_html(true));
        assert_eq!(
            highlighter.highlight("a<b & c", &[6..7]),
            "a&lt;b &amp; <mark>c</mark>"
        );
        assert_eq!(highlighter.highlight("x > y", &[]), "x &gt; y");
        assert_eq!(escape_html(r#"<b class="x">&"#), "&lt;b class=&quot;x&quot;&gt;&amp;");
    }

    #[test]
    fn test_highlight_keywords() {
        let highlighter = Highlighter::default();
        let matcher = KeywordMatcher::new(["sehir", "ISTANBUL"]);
        assert_eq!(
            highlighter.highlight_keywords("İstanbul büyük bir şehir", &matcher),
            "<mark>İstanbul</mark> büyük bir <mark>şehir</mark>"
        );
    }
}
