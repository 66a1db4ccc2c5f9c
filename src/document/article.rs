//! Article records as delivered by the archive backend.
//!
//! The search layer never modifies an article. Records are deserialized from
//! the backend's JSON (camelCase keys, HTML fields) and treated as an
//! immutable snapshot for one search pass.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::document::html::{html_to_text, html_to_text_opt};

/// Identifier of an article, category, owner or tag.
pub type RecordId = i64;

/// A comment attached to an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    /// Comment body as HTML.
    pub text: String,
}

/// Reference to a tag attached to an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagRef {
    pub id: RecordId,
}

/// An archived article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArticleRecord {
    pub id: RecordId,
    pub title: Option<String>,
    /// Article body as HTML.
    pub text: Option<String>,
    /// Short description as HTML.
    pub explanation: Option<String>,
    pub comments: Vec<Comment>,
    pub tags: Vec<TagRef>,
    #[serde(alias = "category_id")]
    pub category_id: Option<RecordId>,
    #[serde(alias = "owner_id")]
    pub owner_id: Option<RecordId>,
    #[serde(alias = "created_at", deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(alias = "updated_at", deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The searchable text fields of an article.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ArticleField {
    Title,
    Explanation,
    Text,
    Comments,
}

impl ArticleField {
    /// All searchable fields, in display order.
    pub const ALL: [ArticleField; 4] = [
        ArticleField::Title,
        ArticleField::Explanation,
        ArticleField::Text,
        ArticleField::Comments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ArticleField::Title => "title",
            ArticleField::Explanation => "explanation",
            ArticleField::Text => "text",
            ArticleField::Comments => "comments",
        }
    }

    /// Short fields are highlighted in full, long ones as context snippets.
    pub fn is_long(&self) -> bool {
        matches!(self, ArticleField::Text | ArticleField::Comments)
    }
}

impl fmt::Display for ArticleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ArticleRecord {
    /// Create an article with only an id and a title.
    pub fn new<S: Into<String>>(id: RecordId, title: S) -> Self {
        ArticleRecord {
            id,
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_explanation<S: Into<String>>(mut self, explanation: S) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_comment<S: Into<String>>(mut self, text: S) -> Self {
        self.comments.push(Comment { text: text.into() });
        self
    }

    pub fn with_tag(mut self, id: RecordId) -> Self {
        self.tags.push(TagRef { id });
        self
    }

    pub fn with_category(mut self, id: RecordId) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn with_owner(mut self, id: RecordId) -> Self {
        self.owner_id = Some(id);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Returns true if the article carries the given tag.
    pub fn has_tag(&self, id: RecordId) -> bool {
        self.tags.iter().any(|tag| tag.id == id)
    }

    /// The plain text of a field: one entry per comment for
    /// [`ArticleField::Comments`], a single entry otherwise.
    pub fn field_texts(&self, field: ArticleField) -> Vec<String> {
        match field {
            ArticleField::Title => vec![html_to_text_opt(self.title.as_deref())],
            ArticleField::Explanation => vec![html_to_text_opt(self.explanation.as_deref())],
            ArticleField::Text => vec![html_to_text_opt(self.text.as_deref())],
            ArticleField::Comments => self
                .comments
                .iter()
                .map(|comment| html_to_text(&comment.text))
                .collect(),
        }
    }
}

/// Accepts RFC 3339 timestamps as well as the `YYYY-MM-DD HH:MM:SS` and
/// `YYYY-MM-DD` forms the backend database emits. Unparseable values are
/// treated as absent.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_timestamp))
}

/// Parse a backend timestamp.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
