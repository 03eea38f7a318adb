//! HTTP calls to the articles API
//!
//! Every failure is mapped onto [`FetchError`] here so callers handle one
//! exhaustive error type.

use blogtools_core::article::Article;
use blogtools_core::fetch::{
    article_url, counter_url, decode_articles, ArticleResponse, Counter, CountersResponse,
    FetchError, FetchRequest,
};

fn network_error(err: reqwest::Error) -> FetchError {
    FetchError::Network(err.to_string())
}

pub async fn fetch_articles(
    client: &reqwest::Client,
    base_url: &str,
    request: &FetchRequest,
) -> Result<Vec<Article>, FetchError> {
    let url = request.url(base_url);
    log::debug!("GET {url}");

    let response = client.get(&url).send().await.map_err(network_error)?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(network_error)?;

    let result = decode_articles(status, &body);
    match &result {
        Ok(articles) => log::debug!("Fetched {} articles", articles.len()),
        Err(err) => log::warn!("Failed to fetch articles from {url}: {err}"),
    }
    result
}

pub async fn fetch_article(
    client: &reqwest::Client,
    base_url: &str,
    slug: &str,
) -> Result<Article, FetchError> {
    let url = article_url(base_url, slug);
    log::debug!("GET {url}");

    let response = client.get(&url).send().await.map_err(network_error)?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }

    let body: ArticleResponse = response
        .json()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(body.article)
}

/// Record one like or share and return the server's counters
pub async fn record_counter(
    client: &reqwest::Client,
    base_url: &str,
    slug: &str,
    counter: Counter,
) -> Result<CountersResponse, FetchError> {
    let url = counter_url(base_url, slug, counter);
    log::debug!("POST {url}");

    let response = client.post(&url).send().await.map_err(network_error)?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }

    response
        .json()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}
