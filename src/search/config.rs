//! Search configuration.
//!
//! A [`SearchConfig`] can be built in code with the builder methods or loaded
//! from a JSON file. Every key is optional; missing keys take their default.
//!
//! ```json
//! {
//!   "highlight": { "tag": "mark", "css_class": "hit" },
//!   "context": { "context_chars": 80, "max_snippets": 3 },
//!   "min_keyword_len": 2,
//!   "match_mode": "all",
//!   "fields": ["title", "text"]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::article::ArticleField;
use crate::error::{ArchivistError, Result};
use crate::highlight::context::ContextConfig;
use crate::highlight::renderer::HighlightConfig;
use crate::search::keyword::MIN_KEYWORD_LEN;

/// How several keywords combine when filtering articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every keyword must occur somewhere in the searched fields.
    #[default]
    All,
    /// At least one keyword must occur.
    Any,
}

/// Configuration for article search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Highlight markup for titles, explanations and snippets.
    pub highlight: HighlightConfig,
    /// Snippet extraction for long fields.
    pub context: ContextConfig,
    /// Minimum keyword length in characters.
    pub min_keyword_len: usize,
    /// How keywords combine.
    pub match_mode: MatchMode,
    /// Fields searched for keywords.
    pub fields: Vec<ArticleField>,
    /// Highlight the match inside context snippets.
    pub highlight_snippets: bool,
    /// Evaluate articles on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            highlight: HighlightConfig::default(),
            context: ContextConfig::default(),
            min_keyword_len: MIN_KEYWORD_LEN,
            match_mode: MatchMode::All,
            fields: ArticleField::ALL.to_vec(),
            highlight_snippets: true,
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn highlight(mut self, highlight: HighlightConfig) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    pub fn min_keyword_len(mut self, min_keyword_len: usize) -> Self {
        self.min_keyword_len = min_keyword_len;
        self
    }

    pub fn match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn fields(mut self, fields: Vec<ArticleField>) -> Self {
        self.fields = fields;
        self
    }

    pub fn highlight_snippets(mut self, highlight_snippets: bool) -> Self {
        self.highlight_snippets = highlight_snippets;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the configuration for values the search cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.min_keyword_len == 0 {
            return Err(ArchivistError::config("min_keyword_len must be at least 1"));
        }
        if self.fields.is_empty() {
            return Err(ArchivistError::config("at least one field must be searched"));
        }
        let tag = &self.highlight.tag;
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ArchivistError::config(format!(
                "invalid highlight tag {tag:?}"
            )));
        }
        if let Some(class) = &self.highlight.css_class
            && class.contains(['"', '<', '>'])
        {
            return Err(ArchivistError::config(format!(
                "invalid highlight css class {class:?}"
            )));
        }
        if self.context.max_snippets == Some(0) {
            return Err(ArchivistError::config("max_snippets must be at least 1"));
        }
        Ok(())
    }
}
