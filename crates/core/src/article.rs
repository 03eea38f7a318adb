//! Article domain model
//!
//! Articles are bilingual records keyed by a URL-safe slug. Every localized
//! field carries one value per supported [`Locale`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Supported content languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ArticleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            other => Err(ArticleError::UnsupportedLocale(other.to_string())),
        }
    }
}

/// Publication status of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Published,
    Draft,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Published => "published",
            ArticleStatus::Draft => "draft",
        }
    }
}

impl FromStr for ArticleStatus {
    type Err = ArticleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "published" => Ok(ArticleStatus::Published),
            "draft" => Ok(ArticleStatus::Draft),
            other => Err(ArticleError::UnsupportedStatus(other.to_string())),
        }
    }
}

/// One string per supported locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub es: String,
    #[serde(default)]
    pub en: String,
}

impl LocalizedText {
    pub fn new(es: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            es: es.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Es => &self.es,
            Locale::En => &self.en,
        }
    }

    /// Locales whose text is empty
    pub fn missing_locales(&self) -> Vec<Locale> {
        Locale::ALL
            .into_iter()
            .filter(|locale| self.get(*locale).trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: LocalizedText,
    pub excerpt: LocalizedText,
    #[serde(default)]
    pub content: LocalizedText,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub author: String,
    #[serde(default)]
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub shares: u64,
}

impl Article {
    pub fn title(&self, locale: Locale) -> &str {
        self.title.get(locale)
    }

    pub fn excerpt(&self, locale: Locale) -> &str {
        self.excerpt.get(locale)
    }

    pub fn content(&self, locale: Locale) -> &str {
        self.content.get(locale)
    }

    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }
}

/// Locale-resolved view of an article for list output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub author: String,
    pub date: String,
    pub image: Option<String>,
}

impl ArticleSummary {
    pub fn from_article(article: &Article, locale: Locale) -> Self {
        Self {
            slug: article.slug.clone(),
            title: article.title(locale).to_string(),
            excerpt: article.excerpt(locale).to_string(),
            category: article.category.clone(),
            tags: article.tags.clone(),
            featured: article.featured,
            author: article.author.clone(),
            date: format_date(&article.created_at),
            image: article.image.clone(),
        }
    }
}

/// Format a creation timestamp as `YYYY-MM-DD`
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArticleError {
    #[error("Unsupported locale: {0}. Valid locales: es, en")]
    UnsupportedLocale(String),

    #[error("Unsupported status: {0}. Valid statuses: published, draft")]
    UnsupportedStatus(String),

    #[error("Article {slug} has no {field} for locale {locale}")]
    MissingTranslation {
        slug: String,
        field: &'static str,
        locale: Locale,
    },

    #[error("Duplicate slug: {0}")]
    DuplicateSlug(String),

    #[error("Article slug is empty or not URL-safe: {0:?}")]
    InvalidSlug(String),
}

/// URL-safe slugs are lowercase ASCII alphanumerics separated by single hyphens
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Check collection invariants, returning every violation found
///
/// Every article must carry title, excerpt and content for all locales, and
/// slugs must be URL-safe and unique within the collection.
pub fn validate_collection(articles: &[Article]) -> Vec<ArticleError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for article in articles {
        if !is_valid_slug(&article.slug) {
            errors.push(ArticleError::InvalidSlug(article.slug.clone()));
        }

        if !seen.insert(article.slug.as_str()) {
            errors.push(ArticleError::DuplicateSlug(article.slug.clone()));
        }

        for (field, text) in [
            ("title", &article.title),
            ("excerpt", &article.excerpt),
            ("content", &article.content),
        ] {
            for locale in text.missing_locales() {
                errors.push(ArticleError::MissingTranslation {
                    slug: article.slug.clone(),
                    field,
                    locale,
                });
            }
        }
    }

    errors
}

/// Article builders shared by the test suites of the workspace
#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Build a complete article created `day` days after 2024-01-01
    pub fn article(slug: &str, day: i64) -> Article {
        Article {
            slug: slug.to_string(),
            title: LocalizedText::new(format!("Titulo {slug}"), format!("Title {slug}")),
            excerpt: LocalizedText::new(format!("Resumen {slug}"), format!("Excerpt {slug}")),
            content: LocalizedText::new("Contenido", "Content"),
            category: "general".to_string(),
            tags: vec![],
            featured: false,
            author: "Equipo".to_string(),
            status: ArticleStatus::Published,
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default()
                + chrono::Duration::days(day),
            image: None,
            likes: 0,
            shares: 0,
        }
    }

    /// `n` articles named `article-1..=n`, each one day newer than the previous
    pub fn articles(n: usize) -> Vec<Article> {
        (1..=n)
            .map(|i| article(&format!("article-{i}"), i as i64))
            .collect()
    }
}
