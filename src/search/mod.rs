//! Article search: keyword sets, configuration and the article searcher.

pub mod article_search;
pub mod config;
pub mod keyword;

pub use self::article_search::{ArticleFilter, ArticleHit, ArticleSearcher};
pub use self::config::{MatchMode, SearchConfig};
pub use self::keyword::{KeywordSet, MIN_KEYWORD_LEN};
