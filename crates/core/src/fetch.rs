//! Article fetch contract
//!
//! Request and response types for the `/api/articles` collection endpoint,
//! and the error sum type returned at the fetch boundary. The HTTP call itself
//! lives in the shell; everything here is pure.

use crate::article::{Article, ArticleStatus, Locale};
use crate::filters::FilterSpec;
use crate::query::QueryParams;
use serde::{Deserialize, Serialize};

pub const ARTICLES_PATH: &str = "/api/articles";

/// Default number of articles requested from the collection endpoint
pub const DEFAULT_FETCH_LIMIT: usize = 100;

/// Message shown to readers when a load fails
pub const LOAD_FAILED_MESSAGE: &str = "Error loading articles. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchRequest {
    pub locale: Locale,
    pub status: ArticleStatus,
    pub limit: usize,
    pub featured: bool,
}

impl FetchRequest {
    pub fn new(locale: Locale, limit: usize) -> Self {
        Self {
            locale,
            status: ArticleStatus::Published,
            limit,
            featured: false,
        }
    }

    /// Request matching a filter spec
    ///
    /// An unknown status filter falls back to `published`.
    pub fn for_filters(locale: Locale, limit: usize, filters: &FilterSpec) -> Self {
        let status = filters
            .status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Self {
            locale,
            status,
            limit,
            featured: filters.featured_only(),
        }
    }

    /// Query parameters in wire order: locale, status, limit, featured
    pub fn to_query(&self) -> QueryParams {
        let mut pairs = vec![
            ("locale", self.locale.as_str().to_string()),
            ("status", self.status.as_str().to_string()),
            ("limit", self.limit.to_string()),
        ];
        if self.featured {
            pairs.push(("featured", "true".to_string()));
        }
        QueryParams::from_pairs(pairs)
    }

    /// Full collection URL for `base_url`
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}{}?{}",
            base_url.trim_end_matches('/'),
            ARTICLES_PATH,
            self.to_query().to_query_string()
        )
    }
}

/// Single-article URL for `base_url`
pub fn article_url(base_url: &str, slug: &str) -> String {
    format!(
        "{}{}/{}",
        base_url.trim_end_matches('/'),
        ARTICLES_PATH,
        urlencoding::encode(slug)
    )
}

/// Success body of the collection endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
}

/// Success body of the single-article endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub article: Article,
}

/// Counters after a like or share was recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountersResponse {
    pub slug: String,
    pub likes: u64,
    pub shares: u64,
}

/// Which engagement counter an action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Counter {
    Like,
    Share,
}

impl Counter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Counter::Like => "like",
            Counter::Share => "share",
        }
    }

    /// Current value of this counter on an article
    pub fn value(&self, article: &Article) -> u64 {
        match self {
            Counter::Like => article.likes,
            Counter::Share => article.shares,
        }
    }

    /// Value of this counter in a server response
    pub fn value_in(&self, response: &CountersResponse) -> u64 {
        match self {
            Counter::Like => response.likes,
            Counter::Share => response.shares,
        }
    }
}

/// URL that records one like or share for `slug`
pub fn counter_url(base_url: &str, slug: &str, counter: Counter) -> String {
    format!("{}/{}", article_url(base_url, slug), counter.as_str())
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// Generic message for readers; the variant detail is for logs
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status(404))
    }
}

/// Classify an HTTP status and body into the fetch result
pub fn decode_articles(status: u16, body: &str) -> Result<Vec<Article>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }

    serde_json::from_str::<ArticlesResponse>(body)
        .map(|response| response.articles)
        .map_err(|e| FetchError::Decode(e.to_string()))
}
