//! Keyword search over a list of articles.
//!
//! Each article is evaluated on its own: the configured fields are converted
//! to plain text, normalized once with their index map, tested for keyword
//! containment and, when the article qualifies, rendered into an
//! [`ArticleHit`] with highlighted short fields and context snippets for the
//! long ones.

use std::ops::Range;

use ahash::AHashSet;
use chrono::{DateTime, Utc};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{NormalizedText, normalize_with_mapping};
use crate::document::article::{ArticleField, ArticleRecord, RecordId};
use crate::error::Result;
use crate::highlight::context::ContextExtractor;
use crate::highlight::matcher::KeywordMatcher;
use crate::highlight::renderer::{Highlighter, escape_html};
use crate::search::config::{MatchMode, SearchConfig};
use crate::search::keyword::KeywordSet;

/// Restricts which articles are considered, independently of keywords.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleFilter {
    pub category_id: Option<RecordId>,
    pub owner_id: Option<RecordId>,
    /// The article must carry at least one of these tags.
    pub tag_ids: Vec<RecordId>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, id: RecordId) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn owner(mut self, id: RecordId) -> Self {
        self.owner_id = Some(id);
        self
    }

    pub fn tag(mut self, id: RecordId) -> Self {
        self.tag_ids.push(id);
        self
    }

    pub fn created_after(mut self, at: DateTime<Utc>) -> Self {
        self.created_after = Some(at);
        self
    }

    pub fn created_before(mut self, at: DateTime<Utc>) -> Self {
        self.created_before = Some(at);
        self
    }

    /// Returns true if the article passes every set criterion.
    ///
    /// Date bounds are inclusive; an article without a creation date fails
    /// any date bound.
    pub fn accepts(&self, article: &ArticleRecord) -> bool {
        if self.category_id.is_some() && article.category_id != self.category_id {
            return false;
        }
        if self.owner_id.is_some() && article.owner_id != self.owner_id {
            return false;
        }
        if !self.tag_ids.is_empty() && !self.tag_ids.iter().any(|id| article.has_tag(*id)) {
            return false;
        }
        if let Some(after) = self.created_after
            && article.created_at.is_none_or(|at| at < after)
        {
            return false;
        }
        if let Some(before) = self.created_before
            && article.created_at.is_none_or(|at| at > before)
        {
            return false;
        }
        true
    }
}

/// A matching article ready for display.
///
/// Every text field is an HTML fragment: text decoded from the stored HTML is
/// escaped again, so only the highlight tags are live markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleHit {
    pub id: RecordId,
    /// Title with keyword matches highlighted.
    pub title: String,
    /// Explanation with keyword matches highlighted, if the article has one.
    pub explanation: Option<String>,
    /// Context snippets from the article body.
    pub text_snippets: Vec<String>,
    /// Context snippets from the comments.
    pub comment_snippets: Vec<String>,
    /// Fields in which at least one keyword occurs.
    pub matched_fields: Vec<ArticleField>,
    /// Total number of keyword occurrences across the searched fields.
    pub match_count: usize,
}

/// Plain and normalized text of one field value.
struct PreparedText {
    field: ArticleField,
    plain: String,
    normalized: NormalizedText,
}

impl PreparedText {
    fn new(field: ArticleField, plain: String) -> Self {
        let normalized = normalize_with_mapping(&plain);
        PreparedText {
            field,
            plain,
            normalized,
        }
    }
}

/// Filters and renders articles for one keyword set.
#[derive(Debug, Clone)]
pub struct ArticleSearcher {
    config: SearchConfig,
    matcher: KeywordMatcher,
    highlighter: Highlighter,
    extractor: ContextExtractor,
}

impl ArticleSearcher {
    /// Create a searcher for a validated keyword set.
    pub fn new(config: SearchConfig, keywords: &KeywordSet) -> Result<Self> {
        config.validate()?;
        let matcher = keywords.matcher();
        let highlighter = Highlighter::new(config.highlight.clone().escape_html(true));
        let extractor = ContextExtractor::new(config.context.clone());

        Ok(ArticleSearcher {
            config,
            matcher,
            highlighter,
            extractor,
        })
    }

    /// Create a searcher from raw keywords, validating them against the
    /// configured minimum length.
    pub fn with_keywords<I, S>(config: SearchConfig, keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = KeywordSet::try_from_iter(keywords, config.min_keyword_len)?;
        Self::new(config, &keywords)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    /// Return the hits for every article accepted by `filter`, in input order.
    ///
    /// Without keywords every accepted article is returned unhighlighted.
    pub fn search(&self, articles: &[ArticleRecord], filter: &ArticleFilter) -> Vec<ArticleHit> {
        let hits: Vec<ArticleHit> = if self.config.parallel {
            articles
                .par_iter()
                .filter(|article| filter.accepts(article))
                .filter_map(|article| self.evaluate(article))
                .collect()
        } else {
            articles
                .iter()
                .filter(|article| filter.accepts(article))
                .filter_map(|article| self.evaluate(article))
                .collect()
        };

        debug!(
            "{} of {} articles match {} keywords",
            hits.len(),
            articles.len(),
            self.matcher.len()
        );

        hits
    }

    /// Evaluate a single article. Returns `None` if it does not match.
    pub fn evaluate(&self, article: &ArticleRecord) -> Option<ArticleHit> {
        if self.matcher.is_empty() {
            return Some(self.unhighlighted(article));
        }

        let prepared: Vec<PreparedText> = self
            .config
            .fields
            .iter()
            .flat_map(|field| {
                article
                    .field_texts(*field)
                    .into_iter()
                    .map(move |text| PreparedText::new(*field, text))
            })
            .collect();

        let mut found: AHashSet<usize> = AHashSet::new();
        for text in &prepared {
            found.extend(self.matcher.matched_keywords(text.normalized.as_str()));
        }

        let accepted = match self.config.match_mode {
            MatchMode::All => found.len() == self.matcher.len(),
            MatchMode::Any => !found.is_empty(),
        };
        if !accepted {
            return None;
        }

        Some(self.render(article, &prepared))
    }

    fn render(&self, article: &ArticleRecord, prepared: &[PreparedText]) -> ArticleHit {
        let mut hit = self.unhighlighted(article);
        let highlighter = self.config.highlight_snippets.then_some(&self.highlighter);

        for text in prepared {
            let ranges: Vec<Range<usize>> = self.matcher.find_original_ranges(&text.normalized);
            if ranges.is_empty() {
                continue;
            }

            hit.match_count += ranges.len();
            if !hit.matched_fields.contains(&text.field) {
                hit.matched_fields.push(text.field);
            }

            if !text.field.is_long() {
                let highlighted = self.highlighter.highlight(&text.plain, &ranges);
                match text.field {
                    ArticleField::Explanation => hit.explanation = Some(highlighted),
                    _ => hit.title = highlighted,
                }
                continue;
            }

            let mut snippets = self.extractor.snippets(&text.plain, &ranges, highlighter);
            if highlighter.is_none() {
                snippets = snippets.into_iter().map(|snippet| escape_html(&snippet)).collect();
            }
            match text.field {
                ArticleField::Comments => hit.comment_snippets.extend(snippets),
                _ => hit.text_snippets.extend(snippets),
            }
        }

        hit.matched_fields.sort();
        hit
    }

    fn unhighlighted(&self, article: &ArticleRecord) -> ArticleHit {
        let explanation = article
            .field_texts(ArticleField::Explanation)
            .into_iter()
            .next()
            .filter(|text| !text.is_empty())
            .map(|text| escape_html(&text));

        ArticleHit {
            id: article.id,
            title: article
                .field_texts(ArticleField::Title)
                .into_iter()
                .next()
                .map(|text| escape_html(&text))
                .unwrap_or_default(),
            explanation,
            text_snippets: Vec::new(),
            comment_snippets: Vec::new(),
            matched_fields: Vec::new(),
            match_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn articles() -> Vec<ArticleRecord> {
        vec![
            ArticleRecord::new(1, "İstanbul'un Tarihi")
                .with_text("<p>Şehir, Bizans döneminde Konstantinopolis adını taşıyordu.</p>")
                .with_category(10)
                .with_tag(100),
            ArticleRecord::new(2, "Ankara Notları")
                .with_explanation("Başkent hakkında <b>kısa</b> notlar")
                .with_comment("İstanbul ile karşılaştırma yapılabilir")
                .with_category(20)
                .with_owner(7),
            ArticleRecord::new(3, "Deniz Kenarı")
                .with_text("Yaz tatili")
                .with_category(10)
                .with_tag(200),
        ]
    }

    #[test]
    fn test_filter_accepts() {
        let articles = articles();
        assert!(ArticleFilter::new().accepts(&articles[0]));
        assert!(ArticleFilter::new().category(10).accepts(&articles[2]));
        assert!(!ArticleFilter::new().category(10).accepts(&articles[1]));
        assert!(ArticleFilter::new().owner(7).accepts(&articles[1]));
        assert!(!ArticleFilter::new().owner(7).accepts(&articles[0]));
        assert!(ArticleFilter::new().tag(5).tag(200).accepts(&articles[2]));
        assert!(!ArticleFilter::new().tag(5).accepts(&articles[2]));
    }

    #[test]
    fn test_filter_dates() {
        let jan = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap();
        let article = ArticleRecord::new(1, "t").with_created_at(jan);

        assert!(ArticleFilter::new().created_after(jan).accepts(&article));
        assert!(!ArticleFilter::new().created_after(feb).accepts(&article));
        assert!(ArticleFilter::new().created_before(feb).accepts(&article));
        assert!(!ArticleFilter::new().created_before(feb).accepts(&ArticleRecord::new(2, "t")));
    }

    #[test]
    fn test_search_across_fields() {
        let searcher =
            ArticleSearcher::with_keywords(SearchConfig::default(), ["istanbul"]).unwrap();
        let hits = searcher.search(&articles(), &ArticleFilter::new());

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 1);
        assert_eq!(hits[0].title, "<mark>İstanbul</mark>'un Tarihi");
        assert_eq!(hits[0].matched_fields, vec![ArticleField::Title]);

        assert_eq!(hits[1].id, 2);
        assert_eq!(hits[1].matched_fields, vec![ArticleField::Comments]);
        assert_eq!(
            hits[1].comment_snippets,
            vec!["<mark>İstanbul</mark> ile karşılaştırma yapılabilir".to_string()]
        );
        assert_eq!(hits[1].explanation.as_deref(), Some("Başkent hakkında kısa notlar"));
    }

    #[test]
    fn test_match_modes() {
        let all = ArticleSearcher::with_keywords(SearchConfig::default(), ["istanbul", "bizans"])
            .unwrap();
        let hits = all.search(&articles(), &ArticleFilter::new());
        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(
            hits[0].matched_fields,
            vec![ArticleField::Title, ArticleField::Text]
        );
        assert_eq!(hits[0].match_count, 2);

        let any = ArticleSearcher::with_keywords(
            SearchConfig::default().match_mode(MatchMode::Any),
            ["tatil", "bizans"],
        )
        .unwrap();
        let hits = any.search(&articles(), &ArticleFilter::new());
        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_restricted_fields() {
        let config = SearchConfig::default().fields(vec![ArticleField::Title]);
        let searcher = ArticleSearcher::with_keywords(config, ["istanbul"]).unwrap();
        let hits = searcher.search(&articles(), &ArticleFilter::new());
        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_no_keywords_returns_filtered_articles() {
        let searcher =
            ArticleSearcher::new(SearchConfig::default(), &KeywordSet::new()).unwrap();
        let hits = searcher.search(&articles(), &ArticleFilter::new().category(10));
        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(hits.iter().all(|h| h.matched_fields.is_empty()));
        assert_eq!(hits[0].title, "İstanbul'un Tarihi");
    }

    #[test]
    fn test_parallel_preserves_order() {
        let config = SearchConfig::default().parallel(true).match_mode(MatchMode::Any);
        let searcher = ArticleSearcher::with_keywords(config, ["istanbul", "deniz"]).unwrap();
        let hits = searcher.search(&articles(), &ArticleFilter::new());
        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_short_keyword_is_rejected() {
        assert!(ArticleSearcher::with_keywords(SearchConfig::default(), ["a"]).is_err());
    }

    #[test]
    fn test_decoded_markup_stays_text() {
        let article = ArticleRecord::new(1, "1 &lt;b&gt; 2 istanbul")
            .with_explanation("Tom &amp; Jerry")
            .with_text("a &lt;script&gt; tag near istanbul");
        let searcher =
            ArticleSearcher::with_keywords(SearchConfig::default(), ["istanbul"]).unwrap();
        let hits = searcher.search(&[article.clone()], &ArticleFilter::new());

        assert_eq!(hits[0].title, "1 &lt;b&gt; 2 <mark>istanbul</mark>");
        assert_eq!(hits[0].explanation.as_deref(), Some("Tom &amp; Jerry"));
        assert_eq!(
            hits[0].text_snippets,
            vec!["a &lt;script&gt; tag near <mark>istanbul</mark>".to_string()]
        );

        let plain = ArticleSearcher::with_keywords(
            SearchConfig::default().highlight_snippets(false),
            ["istanbul"],
        )
        .unwrap();
        let hits = plain.search(&[article.clone()], &ArticleFilter::new());
        assert_eq!(
            hits[0].text_snippets,
            vec!["a &lt;script&gt; tag near istanbul".to_string()]
        );

        let unfiltered = ArticleSearcher::new(SearchConfig::default(), &KeywordSet::new()).unwrap();
        let hits = unfiltered.search(&[article], &ArticleFilter::new());
        assert_eq!(hits[0].title, "1 &lt;b&gt; 2 istanbul");
    }

    #[test]
    fn test_snippets_without_highlighting() {
        let config = SearchConfig::default().highlight_snippets(false);
        let searcher = ArticleSearcher::with_keywords(config, ["bizans"]).unwrap();
        let hits = searcher.search(&articles(), &ArticleFilter::new());
        assert_eq!(
            hits[0].text_snippets,
            vec!["Şehir, Bizans döneminde Konstantinopolis adını taşıyordu.".to_string()]
        );
    }
}
