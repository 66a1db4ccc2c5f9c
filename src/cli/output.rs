//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::offset::SourceSpan;
use crate::cli::args::{ArchivistArgs, OutputFormat};
use crate::error::Result;
use crate::search::article_search::ArticleHit;

/// Result structure for text normalization.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResult {
    pub original: String,
    pub normalized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_map: Option<Vec<SourceSpan>>,
}

/// Result structure for highlighting.
#[derive(Debug, Serialize, Deserialize)]
pub struct HighlightResult {
    pub highlighted: String,
    pub match_count: usize,
}

/// Result structure for context extraction.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContextResult {
    pub snippets: Vec<String>,
}

/// Result structure for article search.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub hits: Vec<ArticleHit>,
    pub total_hits: usize,
    pub total_articles: usize,
    pub duration_ms: u64,
}

/// Human readable rendering of a command result.
pub trait HumanOutput {
    fn print_human(&self, args: &ArchivistArgs);
}

impl HumanOutput for NormalizeResult {
    fn print_human(&self, _args: &ArchivistArgs) {
        println!("{}", self.normalized);

        if let Some(index_map) = &self.index_map {
            println!();
            for (i, (c, span)) in self.normalized.bytes().zip(index_map).enumerate() {
                println!(
                    "{i:>4}  {:<4} <- {}..{} {:?}",
                    format_byte(c),
                    span.start,
                    span.end,
                    &self.original[span.start..span.end]
                );
            }
        }
    }
}

impl HumanOutput for HighlightResult {
    fn print_human(&self, args: &ArchivistArgs) {
        println!("{}", self.highlighted);
        if args.verbosity() > 1 {
            println!();
            println!("Matches: {}", self.match_count);
        }
    }
}

impl HumanOutput for ContextResult {
    fn print_human(&self, _args: &ArchivistArgs) {
        for (i, snippet) in self.snippets.iter().enumerate() {
            println!("{:>3}. {snippet}", i + 1);
        }
    }
}

impl HumanOutput for SearchResults {
    fn print_human(&self, args: &ArchivistArgs) {
        println!("Search Results:");
        println!("═══════════════");

        for (i, hit) in self.hits.iter().enumerate() {
            println!();
            println!("Result {}: article #{} ({} matches)", i + 1, hit.id, hit.match_count);
            println!("─────────────");
            println!("title: {}", hit.title);

            if let Some(explanation) = &hit.explanation {
                println!("explanation: {explanation}");
            }
            for snippet in &hit.text_snippets {
                println!("text: {snippet}");
            }
            for snippet in &hit.comment_snippets {
                println!("comment: {snippet}");
            }
            if !hit.matched_fields.is_empty() && args.verbosity() > 1 {
                let fields: Vec<&str> = hit.matched_fields.iter().map(|f| f.name()).collect();
                println!("matched in: {}", fields.join(", "));
            }
        }

        println!();
        println!("Total hits: {} of {} articles", self.total_hits, self.total_articles);
        if args.verbosity() > 1 {
            println!("Search time: {}ms", self.duration_ms);
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &ArchivistArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &ArchivistArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    result.print_human(args);
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &ArchivistArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn format_byte(b: u8) -> String {
    if b.is_ascii_graphic() || b == b' ' {
        format!("{:?}", b as char)
    } else {
        format!("0x{b:02x}")
    }
}
