//! Core library for blogtools
//!
//! This crate implements the **Functional Core** of the blogtools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`blogtools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`blogtools`**: HTTP fetching, serving, and CLI rendering (the Imperative Shell)
//!
//! The article list is driven by URL state. Data flows one way:
//!
//! ```text
//! query string -> filters -> fetch (shell) -> listing -> pagination -> render (shell)
//! ```
//!
//! # Module Organization
//!
//! - [`article`]: Bilingual article model and collection invariants
//! - [`query`]: Immutable query-string snapshot
//! - [`filters`]: Filter state reader and active filter chips
//! - [`listing`]: Filter, sort and paginate engine
//! - [`pagination`]: Page window, item range and navigation
//! - [`fetch`]: Fetch contract types and the `FetchError` sum type
//! - [`loader`]: List loading state with stale-response protection
//! - [`optimistic`]: Optimistic like/share counter state machine
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use blogtools_core::{filters, listing, pagination, query::QueryParams, article::Locale};
//!
//! let params = QueryParams::parse("search=metamask&page=10");
//! let state = filters::read_filter_state(&params, false);
//!
//! let page = listing::list_articles(&articles, &state.filters, Locale::En, state.page, 9);
//! let controls = pagination::PaginationController::for_page(&page, 9, "/en/blog", 5);
//!
//! assert!(page.current_page <= page.total_pages);
//! ```

pub mod article;
pub mod fetch;
pub mod filters;
pub mod listing;
pub mod loader;
pub mod optimistic;
pub mod pagination;
pub mod query;
