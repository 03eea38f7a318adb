//! Pagination controller
//!
//! Pure functions for turning pagination metadata into navigation controls:
//! the displayed item range, the window of visible page numbers, page URLs,
//! and the navigation step that produces the next URL state.

use crate::filters::PAGE_PARAM;
use crate::listing::ArticlePage;
use crate::query::QueryParams;
use serde::Serialize;

/// Default number of page links shown at once
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Default page size for article lists
pub const DEFAULT_PER_PAGE: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationController {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
    pub base_path: String,
    pub max_visible: usize,
}

/// Serializable view of the controls for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
    pub start_item: usize,
    pub end_item: usize,
    pub visible_pages: Vec<usize>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    /// Absent when already on the first page
    pub first_href: Option<String>,
    /// Absent when already on the last page
    pub last_href: Option<String>,
}

/// Outcome of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The request was out of range or targeted the current page
    Unchanged,
    /// The new URL state and the href to transition to
    Moved { query: QueryParams, href: String },
}

impl PaginationController {
    pub fn new(
        current_page: usize,
        total_pages: usize,
        total_items: usize,
        per_page: usize,
        base_path: impl Into<String>,
        max_visible: usize,
    ) -> Self {
        Self {
            current_page,
            total_pages,
            total_items,
            per_page,
            base_path: base_path.into(),
            max_visible,
        }
    }

    /// Build a controller from the engine's output
    pub fn for_page(
        page: &ArticlePage,
        per_page: usize,
        base_path: impl Into<String>,
        max_visible: usize,
    ) -> Self {
        Self::new(
            page.current_page,
            page.total_pages,
            page.total_items,
            per_page,
            base_path,
            max_visible,
        )
    }

    /// 1-based inclusive range of items shown, `(0, 0)` when empty
    pub fn item_range(&self) -> (usize, usize) {
        if self.total_items == 0 {
            return (0, 0);
        }
        let per_page = self.per_page.max(1);
        let start = (self.current_page.max(1) - 1) * per_page + 1;
        let end = (self.current_page.max(1) * per_page).min(self.total_items);
        (start.min(self.total_items), end)
    }

    pub fn visible_pages(&self) -> Vec<usize> {
        visible_window(self.current_page, self.total_pages, self.max_visible)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    fn in_range(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// URL for `page`, keeping every other parameter of `query`
    pub fn href_for(&self, page: usize, query: &QueryParams) -> String {
        query
            .with(PAGE_PARAM, page.to_string())
            .to_href(&self.base_path)
    }

    /// Compute the URL state after moving to `page`
    ///
    /// Out-of-range targets and the current page are no-ops.
    pub fn navigate_to_page(&self, page: usize, query: &QueryParams) -> Navigation {
        if !self.in_range(page) || page == self.current_page {
            return Navigation::Unchanged;
        }

        let next = query.with(PAGE_PARAM, page.to_string());
        let href = next.to_href(&self.base_path);
        Navigation::Moved { query: next, href }
    }

    pub fn view(&self, query: &QueryParams) -> PaginationView {
        let (start_item, end_item) = self.item_range();
        PaginationView {
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            per_page: self.per_page,
            start_item,
            end_item,
            visible_pages: self.visible_pages(),
            prev_href: self
                .has_previous()
                .then(|| self.href_for(self.current_page - 1, query)),
            next_href: self
                .has_next()
                .then(|| self.href_for(self.current_page + 1, query)),
            first_href: self.has_previous().then(|| self.href_for(1, query)),
            last_href: self
                .has_next()
                .then(|| self.href_for(self.total_pages, query)),
        }
    }
}

/// Window of page numbers centered on `current`
///
/// The window is clamped to `1..=total_pages`; when it hits one boundary it
/// grows from the other so that up to `max_visible` pages stay visible. A
/// `max_visible` of 0 is treated as 1 and anything above `total_pages` as
/// `total_pages`.
pub fn visible_window(current: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }

    let max_visible = max_visible.clamp(1, total_pages);
    let current = current.clamp(1, total_pages);
    let half = max_visible / 2;

    let mut start = current.saturating_sub(half).max(1);
    let end = (start + max_visible - 1).min(total_pages);

    if end - start + 1 < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }

    (start..=end).collect()
}

/// The single writer of URL state
///
/// Holds the current query snapshot and applies navigation results to it,
/// recording every href it transitions to.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    query: QueryParams,
    history: Vec<String>,
}

impl Navigator {
    pub fn new(query: QueryParams) -> Self {
        Self {
            query,
            history: Vec::new(),
        }
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Move to `page`, returning the href pushed, if any
    pub fn navigate_to_page(
        &mut self,
        controller: &PaginationController,
        page: usize,
    ) -> Option<&str> {
        match controller.navigate_to_page(page, &self.query) {
            Navigation::Unchanged => None,
            Navigation::Moved { query, href } => {
                self.query = query;
                self.history.push(href);
                self.history.last().map(String::as_str)
            }
        }
    }
}
