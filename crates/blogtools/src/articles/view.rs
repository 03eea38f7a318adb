//! Article list view controller
//!
//! Owns the list loading state and runs fetches against an
//! [`ArticleSource`]. Loads may run in the background; a load that settles
//! after a newer one started, or after [`ArticleListView::unmount`], is
//! dropped instead of overwriting the view.

use super::ArticleSource;
use blogtools_core::fetch::FetchRequest;
use blogtools_core::loader::{Applied, ListState};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct ArticleListView {
    source: Arc<ArticleSource>,
    state: Arc<Mutex<ListState>>,
}

impl ArticleListView {
    pub fn new(source: ArticleSource) -> Self {
        let state = match &source {
            ArticleSource::Initial(articles) => ListState::with_initial(articles.clone()),
            ArticleSource::Remote { .. } => ListState::new(),
        };

        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Whether the view must fetch before it can render
    pub fn needs_fetch(&self) -> bool {
        matches!(*self.source, ArticleSource::Remote { .. })
    }

    /// Fetch and apply the result
    pub async fn load(&self, request: &FetchRequest) -> Applied {
        let ticket = self.state.lock().await.begin();

        let result = self.source.load(request).await;
        if let Err(err) = &result {
            log::warn!("Article load failed: {err}");
        }

        let applied = self.state.lock().await.settle(ticket, result);
        if applied == Applied::Stale {
            log::debug!("Discarded stale article load");
        }
        applied
    }

    /// Start a load without waiting for it
    pub fn spawn_load(&self, request: FetchRequest) -> JoinHandle<Applied> {
        let view = self.clone();
        tokio::spawn(async move { view.load(&request).await })
    }

    /// Manual retry after a failure
    pub async fn retry(&self, request: &FetchRequest) -> Applied {
        log::info!("Retrying article load");
        self.load(request).await
    }

    pub async fn unmount(&self) {
        self.state.lock().await.unmount();
    }

    pub async fn snapshot(&self) -> ListState {
        self.state.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::articles::test_support::articles;
    use crate::serve::test_server;
    use blogtools_core::article::Locale;
    use blogtools_core::fetch::LOAD_FAILED_MESSAGE;
    use std::time::Duration;

    fn request() -> FetchRequest {
        FetchRequest::new(Locale::En, 100)
    }

    #[tokio::test]
    async fn test_initial_data_needs_no_fetch() {
        let view = ArticleListView::new(ArticleSource::Initial(articles(3)));
        assert!(!view.needs_fetch());

        let state = view.snapshot().await;
        assert_eq!(state.articles().len(), 3);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_remote_load() {
        let base_url = test_server::spawn(articles(4)).await;
        let view = ArticleListView::new(ArticleSource::remote(base_url));
        assert!(view.needs_fetch());

        assert_eq!(view.load(&request()).await, Applied::Yes);

        let state = view.snapshot().await;
        assert_eq!(state.articles().len(), 4);
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn test_http_500_sets_error_and_keeps_articles() {
        let good = test_server::spawn(articles(2)).await;
        let view = ArticleListView::new(ArticleSource::remote(good));
        view.load(&request()).await;

        // same view state, failing upstream
        let failing = ArticleListView {
            source: Arc::new(ArticleSource::remote(test_server::spawn_failing(500).await)),
            state: view.state.clone(),
        };
        failing.load(&request()).await;

        let state = view.snapshot().await;
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some(LOAD_FAILED_MESSAGE));
        assert_eq!(state.articles().len(), 2);
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let view = ArticleListView::new(ArticleSource::remote(
            test_server::spawn_failing(503).await,
        ));
        view.load(&request()).await;
        assert!(view.snapshot().await.error().is_some());

        let recovered = ArticleListView {
            source: Arc::new(ArticleSource::remote(test_server::spawn(articles(1)).await)),
            state: view.state.clone(),
        };
        assert_eq!(recovered.retry(&request()).await, Applied::Yes);
        assert_eq!(view.snapshot().await.error(), None);
    }

    #[tokio::test]
    async fn test_late_response_after_unmount_is_dropped() {
        let base_url = test_server::spawn_slow(articles(5), Duration::from_millis(200)).await;
        let view = ArticleListView::new(ArticleSource::remote(base_url));

        let handle = view.spawn_load(request());
        tokio::time::sleep(Duration::from_millis(20)).await;
        view.unmount().await;

        assert_eq!(handle.await.unwrap(), Applied::Stale);
        assert!(view.snapshot().await.articles().is_empty());
    }
}
