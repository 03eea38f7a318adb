//! Filter, sort and paginate engine
//!
//! Turns a full article collection plus a [`FilterSpec`] into one page of
//! results. Steps run in a fixed order (search, category, tag, featured,
//! sort, paginate) and the engine never fails: out-of-range pages are
//! clamped.

use crate::article::{Article, Locale};
use crate::filters::FilterSpec;
use serde::Serialize;
use std::collections::HashMap;

/// One page of the filtered, sorted collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticlePage {
    pub items: Vec<Article>,
    pub total_pages: usize,
    pub current_page: usize,
    pub total_items: usize,
}

impl ArticlePage {
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

/// Case-insensitive match of `term` against the locale title, locale excerpt
/// and tags
pub fn matches_search(article: &Article, term: &str, locale: Locale) -> bool {
    let term = term.to_lowercase();
    article.title(locale).to_lowercase().contains(&term)
        || article.excerpt(locale).to_lowercase().contains(&term)
        || article
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&term))
}

/// Apply the filter steps in order, preserving input order
pub fn filter_articles<'a>(
    articles: &'a [Article],
    filters: &FilterSpec,
    locale: Locale,
) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|a| match &filters.search {
            Some(term) => matches_search(a, term, locale),
            None => true,
        })
        .filter(|a| match filters.effective_category() {
            Some(category) => a.category == category,
            None => true,
        })
        .filter(|a| match &filters.tag {
            Some(tag) => a.has_tag(tag),
            None => true,
        })
        .filter(|a| !filters.featured_only() || a.featured)
        .collect()
}

/// Newest first; equal timestamps fall back to slug ascending
pub fn sort_articles(articles: &mut [&Article]) {
    articles.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

/// Total pages for `total_items`, never less than 1
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    total_items.div_ceil(per_page.max(1)).max(1)
}

/// Clamp a requested page into `1..=total_pages`
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let total = total_pages.max(1);
    if requested < 1 {
        1
    } else {
        usize::try_from(requested).map_or(total, |page| page.min(total))
    }
}

/// Calculate slice bounds for a clamped page
///
/// Returns `(start, end)` for slicing; the range is empty when there are no
/// items.
pub fn page_bounds(total_items: usize, page: usize, per_page: usize) -> (usize, usize) {
    let per_page = per_page.max(1);
    let start = (page.saturating_sub(1) * per_page).min(total_items);
    let end = (start + per_page).min(total_items);
    (start, end)
}

/// Run the full pipeline and return the requested page
pub fn list_articles(
    articles: &[Article],
    filters: &FilterSpec,
    locale: Locale,
    requested_page: i64,
    per_page: usize,
) -> ArticlePage {
    let mut filtered = filter_articles(articles, filters, locale);
    sort_articles(&mut filtered);

    let total_items = filtered.len();
    let total_pages = total_pages(total_items, per_page);
    let current_page = clamp_page(requested_page, total_pages);
    let (start, end) = page_bounds(total_items, current_page, per_page);

    ArticlePage {
        items: filtered[start..end].iter().map(|a| (*a).clone()).collect(),
        total_pages,
        current_page,
        total_items,
    }
}

/// A taxonomy term with the number of articles using it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub name: String,
    pub count: usize,
}

fn sorted_counts(counts: HashMap<String, usize>) -> Vec<TermCount> {
    let mut terms: Vec<TermCount> = counts
        .into_iter()
        .map(|(name, count)| TermCount { name, count })
        .collect();
    terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    terms
}

/// Distinct categories, most used first
pub fn category_counts(articles: &[Article]) -> Vec<TermCount> {
    let mut counts = HashMap::new();
    for article in articles {
        *counts.entry(article.category.clone()).or_insert(0) += 1;
    }
    sorted_counts(counts)
}

/// Distinct tags (lowercased), most used first
///
/// A tag repeated on one article counts once for it.
pub fn tag_counts(articles: &[Article]) -> Vec<TermCount> {
    let mut counts = HashMap::new();
    for article in articles {
        let mut tags: Vec<String> = article.tags.iter().map(|t| t.to_lowercase()).collect();
        tags.sort();
        tags.dedup();
        for tag in tags {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    sorted_counts(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::fixtures::{article, articles};
    use crate::article::LocalizedText;

    fn spec() -> FilterSpec {
        FilterSpec::default()
    }

    fn slugs(page: &ArticlePage) -> Vec<&str> {
        page.items.iter().map(|a| a.slug.as_str()).collect()
    }

    #[test]
    fn test_25_items_page_10_clamps_to_last_page() {
        let page = list_articles(&articles(25), &spec(), Locale::Es, 10, 9);

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.total_items, 25);
        assert_eq!(page.items.len(), 7);
        // newest first: items 19..=25 of the sorted list are the 7 oldest
        assert_eq!(page.items[0].slug, "article-7");
        assert_eq!(page.items[6].slug, "article-1");
    }

    #[test]
    fn test_first_page_is_newest() {
        let page = list_articles(&articles(25), &spec(), Locale::Es, 1, 9);
        assert_eq!(page.items.len(), 9);
        assert_eq!(page.items[0].slug, "article-25");
    }

    #[test]
    fn test_clamps_low_pages() {
        for requested in [0, -1, -100, i64::MIN] {
            let page = list_articles(&articles(5), &spec(), Locale::Es, requested, 2);
            assert_eq!(page.current_page, 1, "requested {requested}");
        }
    }

    #[test]
    fn test_clamps_high_pages() {
        let page = list_articles(&articles(5), &spec(), Locale::Es, i64::MAX, 2);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let page = list_articles(&[], &spec(), Locale::Es, 4, 9);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert!(page.items.is_empty());
        assert!(page.is_empty());
    }

    #[test]
    fn test_zero_per_page_is_treated_as_one() {
        let page = list_articles(&articles(3), &spec(), Locale::Es, 2, 0);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_slice_never_exceeds_per_page() {
        let collection = articles(23);
        for per_page in 1..=12 {
            for requested in -2..=30 {
                let page = list_articles(&collection, &spec(), Locale::En, requested, per_page);
                assert!(page.items.len() <= per_page);
                assert!(page.current_page >= 1 && page.current_page <= page.total_pages);
            }
        }
    }

    #[test]
    fn test_search_is_locale_aware() {
        let mut english_excerpt = article("english-excerpt", 1);
        english_excerpt.excerpt = LocalizedText::new("Guia de cartera", "Restore your MetaMask vault");

        let mut spanish_title = article("spanish-title", 2);
        spanish_title.title = LocalizedText::new("Recuperar MetaMask", "Recover a browser wallet");

        let collection = vec![english_excerpt, spanish_title];
        let filters = FilterSpec {
            search: Some("metamask".to_string()),
            ..spec()
        };

        let en = list_articles(&collection, &filters, Locale::En, 1, 9);
        assert_eq!(slugs(&en), vec!["english-excerpt"]);

        let es = list_articles(&collection, &filters, Locale::Es, 1, 9);
        assert_eq!(slugs(&es), vec!["spanish-title"]);
    }

    #[test]
    fn test_search_matches_tags() {
        let mut tagged = article("tagged", 1);
        tagged.tags = vec!["Hardware-Wallet".to_string()];
        let collection = vec![tagged, article("plain", 2)];

        let filters = FilterSpec {
            search: Some("hardware".to_string()),
            ..spec()
        };
        let page = list_articles(&collection, &filters, Locale::Es, 1, 9);
        assert_eq!(slugs(&page), vec!["tagged"]);
    }

    #[test]
    fn test_category_filter_exact_and_all_sentinel() {
        let mut wallets = article("wallets", 1);
        wallets.category = "wallets".to_string();
        let mut exchanges = article("exchanges", 2);
        exchanges.category = "exchanges".to_string();
        let collection = vec![wallets, exchanges];

        let exact = FilterSpec {
            category: Some("wallets".to_string()),
            ..spec()
        };
        assert_eq!(
            slugs(&list_articles(&collection, &exact, Locale::Es, 1, 9)),
            vec!["wallets"]
        );

        let case_differs = FilterSpec {
            category: Some("Wallets".to_string()),
            ..spec()
        };
        assert!(list_articles(&collection, &case_differs, Locale::Es, 1, 9).is_empty());

        let all = FilterSpec {
            category: Some("all".to_string()),
            ..spec()
        };
        assert_eq!(list_articles(&collection, &all, Locale::Es, 1, 9).total_items, 2);
    }

    #[test]
    fn test_tag_and_featured_filters() {
        let mut a = article("a", 1);
        a.tags = vec!["Seed".to_string()];
        a.featured = true;
        let mut b = article("b", 2);
        b.tags = vec!["seed".to_string()];
        let c = article("c", 3);
        let collection = vec![a, b, c];

        let by_tag = FilterSpec {
            tag: Some("SEED".to_string()),
            ..spec()
        };
        assert_eq!(
            slugs(&list_articles(&collection, &by_tag, Locale::Es, 1, 9)),
            vec!["b", "a"]
        );

        let featured = FilterSpec {
            featured: Some(true),
            ..by_tag
        };
        assert_eq!(
            slugs(&list_articles(&collection, &featured, Locale::Es, 1, 9)),
            vec!["a"]
        );
    }

    #[test]
    fn test_adding_a_filter_later_equals_applying_all_at_once() {
        let mut collection = articles(12);
        for (i, a) in collection.iter_mut().enumerate() {
            a.category = if i % 2 == 0 { "wallets" } else { "defi" }.to_string();
            if i % 3 == 0 {
                a.tags.push("seed".to_string());
            }
        }

        let first = FilterSpec {
            search: Some("article".to_string()),
            category: Some("wallets".to_string()),
            ..spec()
        };
        let narrowed: Vec<Article> = filter_articles(&collection, &first, Locale::En)
            .into_iter()
            .cloned()
            .collect();
        let tag_only = FilterSpec {
            tag: Some("seed".to_string()),
            ..spec()
        };
        let stepwise = list_articles(&narrowed, &tag_only, Locale::En, 1, 50);

        let all = FilterSpec {
            tag: Some("seed".to_string()),
            ..first
        };
        let at_once = list_articles(&collection, &all, Locale::En, 1, 50);

        assert_eq!(stepwise, at_once);
        assert!(!at_once.is_empty());
    }

    #[test]
    fn test_sort_is_monotonic_with_slug_tie_break() {
        let collection = vec![
            article("b-same-day", 3),
            article("old", 1),
            article("a-same-day", 3),
            article("new", 9),
        ];
        let page = list_articles(&collection, &spec(), Locale::Es, 1, 10);

        assert_eq!(slugs(&page), vec!["new", "a-same-day", "b-same-day", "old"]);
        for pair in page.items.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(100, 2, 10), (10, 20));
        assert_eq!(page_bounds(95, 10, 10), (90, 95));
        assert_eq!(page_bounds(0, 1, 10), (0, 0));
    }

    #[test]
    fn test_category_and_tag_counts() {
        let mut a = article("a", 1);
        a.category = "wallets".to_string();
        a.tags = vec!["Seed".to_string(), "seed".to_string(), "ledger".to_string()];
        let mut b = article("b", 2);
        b.category = "wallets".to_string();
        b.tags = vec!["seed".to_string()];
        let mut c = article("c", 3);
        c.category = "defi".to_string();

        let collection = vec![a, b, c];

        assert_eq!(
            category_counts(&collection),
            vec![
                TermCount {
                    name: "wallets".to_string(),
                    count: 2
                },
                TermCount {
                    name: "defi".to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(
            tag_counts(&collection),
            vec![
                TermCount {
                    name: "seed".to_string(),
                    count: 2
                },
                TermCount {
                    name: "ledger".to_string(),
                    count: 1
                },
            ]
        );
    }
}
