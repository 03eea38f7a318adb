use crate::articles::load_articles_file;
use crate::prelude::{eprintln, *};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use blogtools_core::article::{Article, ArticleStatus, Locale};
use blogtools_core::fetch::{
    ArticleResponse, ArticlesResponse, Counter, CountersResponse, DEFAULT_FETCH_LIMIT,
};
use blogtools_core::listing::sort_articles;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// JSON file with the article collection
    #[arg(long, value_name = "PATH")]
    pub file: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

type SharedArticles = Arc<RwLock<Vec<Article>>>;

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let articles = load_articles_file(&options.file)?;
    let addr = format!("{}:{}", options.host, options.port);

    if global.verbose {
        eprintln!(
            "Serving {} articles from {}",
            articles.len(),
            options.file.display()
        );
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Articles API listening on http://{addr}/api/articles");

    axum::serve(listener, router(articles))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// Routes of the articles API
pub fn router(articles: Vec<Article>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let shared: SharedArticles = Arc::new(RwLock::new(articles));

    Router::new()
        .route("/api/articles", get(list_handler))
        .route("/api/articles/{slug}", get(article_handler))
        .route("/api/articles/{slug}/like", post(like_handler))
        .route("/api/articles/{slug}/share", post(share_handler))
        .layer(cors)
        .with_state(shared)
}

#[derive(Debug, serde::Deserialize)]
struct ArticlesQuery {
    locale: Option<String>,
    status: Option<String>,
    limit: Option<String>,
    featured: Option<String>,
}

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(slug) => (StatusCode::NOT_FOUND, format!("Article not found: {slug}")),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Articles matching the collection query, newest first
fn select_articles(articles: &[Article], query: &ArticlesQuery) -> Result<Vec<Article>, ApiError> {
    // Content is bilingual, so the locale is only validated.
    if let Some(locale) = &query.locale {
        locale
            .parse::<Locale>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    }

    let status = match &query.status {
        Some(status) => status
            .parse::<ArticleStatus>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => ArticleStatus::Published,
    };
    let featured_only = match &query.featured {
        Some(featured) => featured.parse::<bool>().map_err(|_| {
            ApiError::BadRequest(format!("Invalid featured: {featured:?}. Use true or false"))
        })?,
        None => false,
    };
    let limit = match &query.limit {
        Some(limit) => limit.parse::<usize>().map_err(|_| {
            ApiError::BadRequest(format!("Invalid limit: {limit:?}. Use a non-negative integer"))
        })?,
        None => DEFAULT_FETCH_LIMIT,
    };

    let mut selected: Vec<&Article> = articles
        .iter()
        .filter(|a| a.status == status)
        .filter(|a| !featured_only || a.featured)
        .collect();
    sort_articles(&mut selected);

    Ok(selected
        .into_iter()
        .take(limit)
        .cloned()
        .collect())
}

async fn list_handler(
    State(articles): State<SharedArticles>,
    Query(query): Query<ArticlesQuery>,
) -> Result<Json<ArticlesResponse>, ApiError> {
    log::debug!("GET /api/articles {query:?}");
    let articles = articles.read().await;
    let selected = select_articles(&articles, &query)?;
    Ok(Json(ArticlesResponse { articles: selected }))
}

async fn article_handler(
    State(articles): State<SharedArticles>,
    Path(slug): Path<String>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let articles = articles.read().await;
    articles
        .iter()
        .find(|a| a.slug == slug)
        .map(|a| Json(ArticleResponse { article: a.clone() }))
        .ok_or(ApiError::NotFound(slug))
}

async fn bump_counter(
    articles: SharedArticles,
    slug: String,
    counter: Counter,
) -> Result<Json<CountersResponse>, ApiError> {
    let mut articles = articles.write().await;
    let article = articles
        .iter_mut()
        .find(|a| a.slug == slug)
        .ok_or(ApiError::NotFound(slug))?;

    match counter {
        Counter::Like => article.likes += 1,
        Counter::Share => article.shares += 1,
    }

    Ok(Json(CountersResponse {
        slug: article.slug.clone(),
        likes: article.likes,
        shares: article.shares,
    }))
}

async fn like_handler(
    State(articles): State<SharedArticles>,
    Path(slug): Path<String>,
) -> Result<Json<CountersResponse>, ApiError> {
    bump_counter(articles, slug, Counter::Like).await
}

async fn share_handler(
    State(articles): State<SharedArticles>,
    Path(slug): Path<String>,
) -> Result<Json<CountersResponse>, ApiError> {
    bump_counter(articles, slug, Counter::Share).await
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::articles::test_support::{article, articles};

    fn query(
        locale: Option<&str>,
        status: Option<&str>,
        limit: Option<&str>,
        featured: Option<&str>,
    ) -> ArticlesQuery {
        ArticlesQuery {
            locale: locale.map(str::to_string),
            status: status.map(str::to_string),
            limit: limit.map(str::to_string),
            featured: featured.map(str::to_string),
        }
    }

    #[test]
    fn test_select_articles_defaults_to_published_newest_first() {
        let mut draft = article("draft", 10);
        draft.status = ArticleStatus::Draft;
        let mut collection = articles(3);
        collection.push(draft);

        let selected = select_articles(&collection, &query(None, None, None, None)).unwrap();
        let slugs: Vec<&str> = selected.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["article-3", "article-2", "article-1"]);
    }

    #[test]
    fn test_select_articles_featured_and_limit() {
        let collection = articles(6);
        let selected =
            select_articles(&collection, &query(Some("en"), None, Some("2"), Some("true"))).unwrap();
        let slugs: Vec<&str> = selected.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["article-6", "article-4"]);
    }

    #[test]
    fn test_select_articles_rejects_unknown_locale_and_status() {
        let collection = articles(1);
        assert!(matches!(
            select_articles(&collection, &query(Some("fr"), None, None, None)),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            select_articles(&collection, &query(None, Some("archived"), None, None)),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_select_articles_rejects_malformed_featured_and_limit() {
        let collection = articles(1);
        assert!(matches!(
            select_articles(&collection, &query(None, None, None, Some("1"))),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            select_articles(&collection, &query(None, None, Some("abc"), None)),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_http_malformed_params_answer_json_400() {
        let base_url = test_server::spawn(articles(1)).await;

        for params in ["featured=1", "limit=abc"] {
            let response = reqwest::get(format!("{base_url}/api/articles?{params}"))
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), 400);

            let body: serde_json::Value = response.json().await.unwrap();
            assert!(body["error"].is_string(), "{params}: {body}");
        }
    }

    #[tokio::test]
    async fn test_http_bad_locale_is_400() {
        let base_url = test_server::spawn(articles(1)).await;
        let response = reqwest::get(format!("{base_url}/api/articles?locale=fr"))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_http_share_counts_accumulate() {
        let base_url = test_server::spawn(articles(1)).await;
        let client = reqwest::Client::new();
        let url = format!("{base_url}/api/articles/article-1/share");

        client.post(&url).send().await.unwrap();
        let counters: CountersResponse = client.post(&url).send().await.unwrap().json().await.unwrap();

        assert_eq!(counters.shares, 2);
        assert_eq!(counters.likes, 0);
    }

    #[tokio::test]
    async fn test_http_like_unknown_slug_is_404() {
        let base_url = test_server::spawn(articles(1)).await;
        let response = reqwest::Client::new()
            .post(format!("{base_url}/api/articles/missing/like"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);
    }
}
