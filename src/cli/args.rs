//! Command line argument parsing for the Archivist CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::document::article::{ArticleField, RecordId};
use crate::search::config::MatchMode;

/// Archivist - keyword search and highlighting for an article archive
#[derive(Parser, Debug, Clone)]
#[command(name = "archivist")]
#[command(about = "Diacritic-aware keyword search and highlighting for an article archive")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ArchivistArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ArchivistArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the folded form of a text
    Normalize(NormalizeArgs),

    /// Highlight keyword matches in a text
    Highlight(HighlightArgs),

    /// Extract context snippets around keyword matches
    Context(ContextArgs),

    /// Search a JSON file of articles
    Search(SearchArgs),
}

/// Arguments for normalizing text
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Text to normalize ("-" reads standard input)
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Include the byte index map into the original text
    #[arg(long)]
    pub mapping: bool,
}

/// Arguments for highlighting text
#[derive(Parser, Debug, Clone)]
pub struct HighlightArgs {
    /// Text to highlight ("-" reads standard input)
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Keyword to highlight (repeatable)
    #[arg(short, long = "keyword", required = true)]
    pub keywords: Vec<String>,

    /// HTML tag wrapped around matches
    #[arg(long, default_value = "mark")]
    pub tag: String,

    /// CSS class added to the highlight tag
    #[arg(long = "class")]
    pub css_class: Option<String>,

    /// Treat the text as HTML and convert it to plain text first
    #[arg(long)]
    pub html: bool,
}

/// Arguments for extracting context snippets
#[derive(Parser, Debug, Clone)]
pub struct ContextArgs {
    /// Text to search ("-" reads standard input)
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Keyword to look for (repeatable)
    #[arg(short, long = "keyword", required = true)]
    pub keywords: Vec<String>,

    /// Characters of context on each side of a match
    #[arg(short = 'c', long, default_value = "50")]
    pub context_chars: usize,

    /// Marker added where a snippet is cut
    #[arg(long)]
    pub ellipsis: Option<String>,

    /// Treat the text as HTML and convert it to plain text first
    #[arg(long)]
    pub html: bool,
}

/// Arguments for searching articles
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// JSON file containing an array of articles
    #[arg(value_name = "ARTICLES_FILE")]
    pub articles_file: PathBuf,

    /// Keyword to search for (repeatable)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Search configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "ARCHIVIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// How keywords combine (overrides the configuration)
    #[arg(short = 'm', long)]
    pub mode: Option<MatchMode>,

    /// Fields to search (comma-separated, overrides the configuration)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<ArticleField>,

    /// Only articles in this category
    #[arg(long)]
    pub category: Option<RecordId>,

    /// Only articles of this owner
    #[arg(long)]
    pub owner: Option<RecordId>,

    /// Only articles carrying one of these tags (comma-separated)
    #[arg(long = "tags", value_delimiter = ',')]
    pub tag_ids: Vec<RecordId>,

    /// Maximum number of hits to print
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Evaluate articles in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_search_command() {
        let args = ArchivistArgs::try_parse_from([
            "archivist",
            "search",
            "articles.json",
            "-k",
            "istanbul",
            "--keyword",
            "tarih",
            "--mode",
            "any",
            "--fields",
            "title,comments",
            "--tags",
            "1,2",
            "--limit",
            "5",
        ])
        .unwrap();

        if let Command::Search(search_args) = args.command {
            assert_eq!(search_args.articles_file, PathBuf::from("articles.json"));
            assert_eq!(search_args.keywords, vec!["istanbul", "tarih"]);
            assert_eq!(search_args.mode, Some(MatchMode::Any));
            assert_eq!(
                search_args.fields,
                vec![ArticleField::Title, ArticleField::Comments]
            );
            assert_eq!(search_args.tag_ids, vec![1, 2]);
            assert_eq!(search_args.limit, Some(5));
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_highlight_requires_keyword() {
        assert!(ArchivistArgs::try_parse_from(["archivist", "highlight", "text"]).is_err());

        let args =
            ArchivistArgs::try_parse_from(["archivist", "highlight", "text", "-k", "te"]).unwrap();
        if let Command::Highlight(highlight_args) = args.command {
            assert_eq!(highlight_args.tag, "mark");
            assert_eq!(highlight_args.css_class, None);
        } else {
            panic!("Expected Highlight command");
        }
    }

    #[test]
    fn test_context_defaults() {
        let args =
            ArchivistArgs::try_parse_from(["archivist", "context", "some text", "-k", "text"])
                .unwrap();
        if let Command::Context(context_args) = args.command {
            assert_eq!(context_args.context_chars, 50);
            assert!(!context_args.html);
        } else {
            panic!("Expected Context command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = ArchivistArgs::try_parse_from(["archivist", "normalize", "x"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = ArchivistArgs::try_parse_from(["archivist", "-vv", "normalize", "x"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args =
            ArchivistArgs::try_parse_from(["archivist", "--quiet", "normalize", "x"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            ArchivistArgs::try_parse_from(["archivist", "--format", "json", "normalize", "x"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}
