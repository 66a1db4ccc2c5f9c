//! HTML to plain text conversion for article fields.
//!
//! Article bodies, explanations and comments are stored as HTML. Keyword
//! matching and snippet extraction work on the visible text only, so markup
//! is stripped, entities decoded and whitespace runs collapsed first.
//!
//! # Examples
//!
//! ```
//! use archivist::document::html::html_to_text;
//!
//! let text = html_to_text("<p>Fish &amp; <b>chips</b></p>\n<p>today</p>");
//! assert_eq!(text, "Fish & chips today");
//! ```

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref MARKUP: Regex = Regex::new(
        r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<!--.*?-->|</?([a-z][a-z0-9]*)\b[^>]*>|&(#[0-9]{1,7}|#x[0-9a-f]{1,6}|[a-z]{2,8});"
    )
    .expect("markup pattern is valid");
}

/// Tags that separate blocks of text and are replaced with a space rather
/// than removed, so words on either side do not run together.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p", "pre", "section",
    "table", "td", "th", "tr", "ul",
];

/// Convert an HTML fragment to the plain text a reader would see.
pub fn html_to_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let stripped = MARKUP.replace_all(html, |captures: &Captures<'_>| replacement(captures));
    collapse_whitespace(&stripped)
}

/// Convert an optional HTML fragment; an absent value becomes empty text.
pub fn html_to_text_opt(html: Option<&str>) -> String {
    html.map(html_to_text).unwrap_or_default()
}

/// Comments, `script` and `style` elements are dropped entirely, block level
/// tags become a single space and other tags vanish. Unknown entities are
/// left untouched.
fn replacement(captures: &Captures<'_>) -> String {
    if let Some(tag) = captures.get(1) {
        let tag = tag.as_str().to_ascii_lowercase();
        return if BLOCK_TAGS.contains(&tag.as_str()) {
            " ".to_string()
        } else {
            String::new()
        };
    }

    if let Some(entity) = captures.get(2) {
        return match decode_entity(entity.as_str()) {
            Some(c) => c.to_string(),
            None => captures[0].to_string(),
        };
    }

    // script, style or comment
    String::new()
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(decimal) = entity.strip_prefix('#') {
        return decimal.parse::<u32>().ok().and_then(char::from_u32);
    }

    let c = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        _ => return None,
    };
    Some(c)
}

fn collapse_whitespace(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !output.is_empty() {
            output.push(' ');
        }
        output.push_str(word);
    }
    output
}
