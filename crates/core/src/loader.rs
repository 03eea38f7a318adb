//! Article list loading state
//!
//! A small state machine for the list view: which articles are shown, whether
//! a fetch is in flight, and the last error. Each load is tagged with a
//! generation; results from a superseded load, or arriving after the view was
//! unmounted, are discarded.

use crate::article::Article;
use crate::fetch::FetchError;
use serde::Serialize;

/// Identifies one load; only the latest one may update the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadTicket(u64);

/// Whether a completed load was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Yes,
    /// Superseded by a newer load or arrived after unmount
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListState {
    articles: Vec<Article>,
    loading: bool,
    error: Option<String>,
    generation: u64,
    unmounted: bool,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with pre-supplied articles; no fetch is needed
    pub fn with_initial(articles: Vec<Article>) -> Self {
        Self {
            articles,
            ..Self::default()
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        !self.unmounted
    }

    /// Start a load, superseding any in-flight one
    ///
    /// The previous error is cleared; the shown articles stay until the load
    /// settles.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        LoadTicket(self.generation)
    }

    /// Start a new load after a failure. Identical to [`ListState::begin`].
    pub fn retry(&mut self) -> LoadTicket {
        self.begin()
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        !self.unmounted && ticket.0 == self.generation
    }

    /// Settle a load with its fetch result
    ///
    /// On failure the previous articles are retained and a reader-facing
    /// message is recorded.
    pub fn settle(&mut self, ticket: LoadTicket, result: Result<Vec<Article>, FetchError>) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }

        self.loading = false;
        match result {
            Ok(articles) => {
                self.articles = articles;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.user_message().to_string());
            }
        }
        Applied::Yes
    }

    /// Mark the view gone; later results are ignored
    pub fn unmount(&mut self) {
        self.unmounted = true;
        self.loading = false;
    }
}
