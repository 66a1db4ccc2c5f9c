//! Command implementations for the Archivist CLI.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::analysis::normalizer::{normalize, normalize_with_mapping};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::article::ArticleRecord;
use crate::document::html::html_to_text;
use crate::error::{ArchivistError, Result};
use crate::highlight::context::{ContextConfig, ContextExtractor};
use crate::highlight::matcher::KeywordMatcher;
use crate::highlight::renderer::{HighlightConfig, Highlighter};
use crate::search::article_search::{ArticleFilter, ArticleSearcher};
use crate::search::config::SearchConfig;
use crate::search::keyword::KeywordSet;

/// Execute a CLI command.
pub fn execute_command(args: ArchivistArgs) -> Result<()> {
    match &args.command {
        Command::Normalize(normalize_args) => normalize_text(normalize_args, &args),
        Command::Highlight(highlight_args) => highlight_text(highlight_args, &args),
        Command::Context(context_args) => extract_context(context_args, &args),
        Command::Search(search_args) => search_articles(search_args, &args),
    }
}

/// Show the normalized form of a text.
fn normalize_text(args: &NormalizeArgs, cli_args: &ArchivistArgs) -> Result<()> {
    let original = read_text_arg(&args.text)?;

    let result = if args.mapping {
        let normalized = normalize_with_mapping(&original);
        let (normalized, index_map) = normalized.into_parts();
        NormalizeResult {
            original,
            normalized,
            index_map: Some(index_map),
        }
    } else {
        NormalizeResult {
            normalized: normalize(&original),
            original,
            index_map: None,
        }
    };

    output_result("Normalized text", &result, cli_args)
}

/// Highlight keyword matches in a text.
fn highlight_text(args: &HighlightArgs, cli_args: &ArchivistArgs) -> Result<()> {
    let text = prepare_text(&args.text, args.html)?;
    let matcher = matcher_from_args(&args.keywords)?;

    // Text decoded from HTML is escaped again so the output stays HTML.
    let mut config = HighlightConfig::new()
        .tag(args.tag.clone())
        .escape_html(args.html);
    if let Some(css_class) = &args.css_class {
        config = config.css_class(css_class.clone());
    }
    SearchConfig::new().highlight(config.clone()).validate()?;

    let ranges = matcher.find_original_ranges(&normalize_with_mapping(&text));
    let result = HighlightResult {
        highlighted: Highlighter::new(config).highlight(&text, &ranges),
        match_count: ranges.len(),
    };

    output_result("Highlighted text", &result, cli_args)
}

/// Extract context snippets around keyword matches.
fn extract_context(args: &ContextArgs, cli_args: &ArchivistArgs) -> Result<()> {
    let text = prepare_text(&args.text, args.html)?;
    let matcher = matcher_from_args(&args.keywords)?;

    let mut config = ContextConfig::new().context_chars(args.context_chars);
    if let Some(ellipsis) = &args.ellipsis {
        config = config.ellipsis(ellipsis.clone());
    }

    let result = ContextResult {
        snippets: ContextExtractor::new(config).extract(&text, &matcher),
    };

    output_result("Context snippets", &result, cli_args)
}

/// Search a JSON file of articles.
fn search_articles(args: &SearchArgs, cli_args: &ArchivistArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from: {}", path.display());
            SearchConfig::from_file(path)?
        }
        None => SearchConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.match_mode = mode;
    }
    if !args.fields.is_empty() {
        config.fields = args.fields.clone();
    }
    if args.parallel {
        config.parallel = true;
    }

    let articles = load_articles(&args.articles_file)?;
    info!(
        "Loaded {} articles from: {}",
        articles.len(),
        args.articles_file.display()
    );

    let filter = ArticleFilter {
        category_id: args.category,
        owner_id: args.owner,
        tag_ids: args.tag_ids.clone(),
        ..Default::default()
    };

    let start_time = Instant::now();
    let searcher = ArticleSearcher::with_keywords(config, &args.keywords)?;
    let mut hits = searcher.search(&articles, &filter);
    let duration = start_time.elapsed();

    let total_hits = hits.len();
    if let Some(limit) = args.limit {
        hits.truncate(limit);
    }

    output_result(
        "Search completed",
        &SearchResults {
            hits,
            total_hits,
            total_articles: articles.len(),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Read a JSON array of articles from a file.
pub fn load_articles(path: &Path) -> Result<Vec<ArticleRecord>> {
    let content = fs::read_to_string(path)?;
    let articles: Vec<ArticleRecord> = serde_json::from_str(&content)?;
    Ok(articles)
}

/// Resolve a text argument, reading standard input for "-".
fn read_text_arg(text: &str) -> Result<String> {
    if text != "-" {
        return Ok(text.to_string());
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    debug!("Read {} bytes from standard input", buffer.len());
    Ok(buffer)
}

fn prepare_text(text: &str, html: bool) -> Result<String> {
    let text = read_text_arg(text)?;
    if text.is_empty() {
        return Err(ArchivistError::invalid_argument("text must not be empty"));
    }
    Ok(if html { html_to_text(&text) } else { text })
}

/// Build a matcher from CLI keywords. Single character keywords are allowed
/// here; only the article search enforces the configured minimum.
fn matcher_from_args(keywords: &[String]) -> Result<KeywordMatcher> {
    Ok(KeywordSet::try_from_iter(keywords, 1)?.matcher())
}
