//! Filter state reader
//!
//! Derives the active list filters and the requested page from a query
//! snapshot. Reading is pure; out-of-range pages are left for the listing
//! engine to clamp.

use crate::query::QueryParams;
use serde::Serialize;

pub const SEARCH_PARAM: &str = "search";
pub const CATEGORY_PARAM: &str = "category";
pub const TAG_PARAM: &str = "tag";
pub const STATUS_PARAM: &str = "status";
pub const PAGE_PARAM: &str = "page";

/// Category value that disables category filtering
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
}

impl FilterSpec {
    /// Category to filter by, `None` when absent or the `all` sentinel
    pub fn effective_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| *category != ALL_CATEGORIES)
    }

    pub fn featured_only(&self) -> bool {
        self.featured.unwrap_or(false)
    }
}

/// Result of reading list state from the URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub filters: FilterSpec,
    pub page: i64,
}

/// Read filters and page from a query snapshot
pub fn read_filter_state(params: &QueryParams, featured_only: bool) -> FilterState {
    let owned = |key: &str| params.get_non_empty(key).map(str::to_string);

    FilterState {
        filters: FilterSpec {
            search: owned(SEARCH_PARAM),
            category: owned(CATEGORY_PARAM),
            tag: owned(TAG_PARAM),
            status: owned(STATUS_PARAM),
            featured: featured_only.then_some(true),
        },
        page: parse_page(params.get(PAGE_PARAM)),
    }
}

/// Parse a page number, defaulting to 1
///
/// Uses leading-integer semantics: surrounding whitespace and an optional sign
/// are accepted and anything after the leading digits is ignored, so `"2abc"`
/// reads as 2. No digits, or a value that overflows, yields 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 1;
    };

    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    match digits.parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => 1,
    }
}

/// A removable filter chip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    pub key: &'static str,
    pub value: String,
    /// Query with this filter removed and pagination reset
    pub clear_query: QueryParams,
}

/// List the filters currently narrowing the list
///
/// Each entry carries the query that removes it. Removing a filter also drops
/// `page`, since the old page number is meaningless for a different result
/// set.
pub fn active_filters(params: &QueryParams, filters: &FilterSpec) -> Vec<ActiveFilter> {
    let chip = |key: &'static str, value: &str| ActiveFilter {
        key,
        value: value.to_string(),
        clear_query: params.without(key).without(PAGE_PARAM),
    };

    let mut chips = Vec::new();

    if let Some(search) = &filters.search {
        chips.push(chip(SEARCH_PARAM, search));
    }
    if let Some(category) = filters.effective_category() {
        chips.push(chip(CATEGORY_PARAM, category));
    }
    if let Some(tag) = &filters.tag {
        chips.push(chip(TAG_PARAM, tag));
    }

    chips
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_filter_state_all_fields() {
        let params =
            QueryParams::parse("search=ledger&category=wallets&tag=seed&status=draft&page=3");
        let state = read_filter_state(&params, true);

        assert_eq!(state.filters.search.as_deref(), Some("ledger"));
        assert_eq!(state.filters.category.as_deref(), Some("wallets"));
        assert_eq!(state.filters.tag.as_deref(), Some("seed"));
        assert_eq!(state.filters.status.as_deref(), Some("draft"));
        assert_eq!(state.filters.featured, Some(true));
        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_read_filter_state_empty_query() {
        let state = read_filter_state(&QueryParams::new(), false);
        assert_eq!(state.filters, FilterSpec::default());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_read_filter_state_empty_values_are_absent() {
        let state = read_filter_state(&QueryParams::parse("search=&tag="), false);
        assert_eq!(state.filters.search, None);
        assert_eq!(state.filters.tag, None);
    }

    #[test]
    fn test_parse_page_defaults() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("-")), 1);
    }

    #[test]
    fn test_parse_page_leading_integer() {
        assert_eq!(parse_page(Some("7")), 7);
        assert_eq!(parse_page(Some("  4")), 4);
        assert_eq!(parse_page(Some("2abc")), 2);
        assert_eq!(parse_page(Some("3.9")), 3);
        assert_eq!(parse_page(Some("+5")), 5);
    }

    #[test]
    fn test_parse_page_keeps_out_of_range_values() {
        assert_eq!(parse_page(Some("0")), 0);
        assert_eq!(parse_page(Some("-2")), -2);
        assert_eq!(parse_page(Some("1000")), 1000);
    }

    #[test]
    fn test_parse_page_overflow_defaults() {
        assert_eq!(parse_page(Some("99999999999999999999999")), 1);
    }

    #[test]
    fn test_effective_category_ignores_all() {
        let mut filters = FilterSpec {
            category: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.effective_category(), None);

        filters.category = Some("wallets".to_string());
        assert_eq!(filters.effective_category(), Some("wallets"));
    }

    #[test]
    fn test_active_filters() {
        let params = QueryParams::parse("search=ledger&category=all&tag=seed&page=2&ref=nav");
        let state = read_filter_state(&params, false);

        let chips = active_filters(&params, &state.filters);

        assert_eq!(chips.len(), 2);
        assert_eq!(chips[0].key, SEARCH_PARAM);
        assert_eq!(chips[0].value, "ledger");
        assert_eq!(
            chips[0].clear_query.to_query_string(),
            "category=all&tag=seed&ref=nav"
        );
        assert_eq!(chips[1].key, TAG_PARAM);
        assert_eq!(
            chips[1].clear_query.to_query_string(),
            "search=ledger&category=all&ref=nav"
        );
    }
}
