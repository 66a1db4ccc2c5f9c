//! Article documents consumed by the search layer.
//!
//! - [`article::ArticleRecord`] - An archived article with its comments and tags
//! - [`article::ArticleField`] - The searchable text fields of an article
//! - [`html::html_to_text`] - Converts stored HTML fields to plain text

pub mod article;
pub mod html;

pub use article::{ArticleField, ArticleRecord, Comment, RecordId, TagRef};
pub use html::{html_to_text, html_to_text_opt};
