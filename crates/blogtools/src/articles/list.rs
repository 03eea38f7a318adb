use super::view::ArticleListView;
use super::{ArticleSource, SourceArgs};
use crate::config::Config;
use crate::prelude::{eprintln, print, println, *};
use blogtools_core::article::{Article, ArticleSummary, Locale};
use blogtools_core::fetch::{FetchRequest, DEFAULT_FETCH_LIMIT};
use blogtools_core::filters::{active_filters, read_filter_state, FilterSpec, FilterState};
use blogtools_core::listing::list_articles;
use blogtools_core::pagination::{PaginationController, PaginationView};
use blogtools_core::query::QueryParams;
use colored::Colorize;

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// URL query string, e.g. "search=metamask&category=wallets&page=2"
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Only list featured articles
    #[arg(long)]
    pub featured_only: bool,

    /// Path the page links point to (defaults to /<locale>/blog)
    #[arg(long)]
    pub base_path: Option<String>,

    /// Maximum number of articles requested from the API
    #[arg(short, long, env = "BLOGTOOLS_FETCH_LIMIT", default_value_t = DEFAULT_FETCH_LIMIT)]
    pub limit: usize,

    #[clap(flatten)]
    pub source: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// A filter chip with the link that removes it
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FilterChip {
    pub key: String,
    pub value: String,
    pub clear_href: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ListOutput {
    pub locale: Locale,
    pub query: String,
    pub filters: FilterSpec,
    pub active_filters: Vec<FilterChip>,
    pub items: Vec<ArticleSummary>,
    pub pagination: PaginationView,
    pub error: Option<String>,
}

pub async fn run(options: ListOptions, config: Config) -> Result<()> {
    if config.verbose {
        eprintln!("Listing articles for query {:?}...", options.query);
    }

    let output = list_articles_data(&options, &config).await?;

    if options.json {
        println!("{}", format_list_json(&output)?);
    } else {
        print!("{}", format_list_text(&output));
    }

    Ok(())
}

/// Load, filter and paginate articles for a query string
///
/// A failed fetch does not fail the listing: the output carries the error
/// message and whatever articles the view already held.
pub async fn list_articles_data(options: &ListOptions, config: &Config) -> Result<ListOutput> {
    let params = QueryParams::parse(&options.query);
    let state = read_filter_state(&params, options.featured_only);

    let source = ArticleSource::resolve(options.source.file.as_deref(), config)?;
    let view = ArticleListView::new(source);

    if view.needs_fetch() {
        let request = FetchRequest::for_filters(config.locale, options.limit, &state.filters);
        view.load(&request).await;
    }

    let snapshot = view.snapshot().await;
    let base_path = options
        .base_path
        .clone()
        .unwrap_or_else(|| config.blog_path());

    Ok(build_list_output(
        snapshot.articles(),
        &params,
        &state,
        config,
        &base_path,
        snapshot.error().map(str::to_string),
    ))
}

/// Run the listing pipeline over an already loaded collection
pub fn build_list_output(
    articles: &[Article],
    params: &QueryParams,
    state: &FilterState,
    config: &Config,
    base_path: &str,
    error: Option<String>,
) -> ListOutput {
    let page = list_articles(
        articles,
        &state.filters,
        config.locale,
        state.page,
        config.per_page,
    );
    let controller =
        PaginationController::for_page(&page, config.per_page, base_path, config.max_visible);

    ListOutput {
        locale: config.locale,
        query: params.to_query_string(),
        filters: state.filters.clone(),
        active_filters: active_filters(params, &state.filters)
            .into_iter()
            .map(|chip| FilterChip {
                key: chip.key.to_string(),
                value: chip.value,
                clear_href: chip.clear_query.to_href(base_path),
            })
            .collect(),
        items: page
            .items
            .iter()
            .map(|a| ArticleSummary::from_article(a, config.locale))
            .collect(),
        pagination: controller.view(params),
        error,
    }
}

fn format_list_json(output: &ListOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// CLI command that reproduces `query` with `page` set
fn page_command(query: &str, page: usize) -> String {
    let next = QueryParams::parse(query).with("page", page.to_string());
    format!("blogtools articles list '{}'", next.to_query_string())
}

fn format_window(pagination: &PaginationView) -> String {
    pagination
        .visible_pages
        .iter()
        .map(|page| {
            if *page == pagination.current_page {
                format!("[{page}]").bright_cyan().bold().to_string()
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_list_text(output: &ListOutput) -> String {
    let mut result = String::new();
    let pagination = &output.pagination;

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "ARTICLES [{}] (Page {} of {})",
            output.locale.as_str().to_uppercase(),
            pagination.current_page,
            pagination.total_pages
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if !output.active_filters.is_empty() {
        result.push_str(&format!("\n{}:\n", "Active filters".bright_white().bold()));
        for chip in &output.active_filters {
            result.push_str(&format!(
                "  {}: {} ({}: {})\n",
                chip.key.green(),
                chip.value.bright_white(),
                "clear".bright_black(),
                chip.clear_href.cyan()
            ));
        }
    }

    if let Some(error) = &output.error {
        result.push_str(&format!("\n{}\n", error.red().bold()));
        result.push_str(&format!(
            "  {}: {}\n",
            "Retry".green(),
            page_command(&output.query, pagination.current_page).cyan()
        ));
    }

    if output.items.is_empty() {
        if output.error.is_none() {
            result.push_str(&format!(
                "\n{}\n",
                "No articles match these filters.".yellow()
            ));
        }
    } else {
        for (idx, item) in output.items.iter().enumerate() {
            let number = pagination.start_item + idx;
            let star = if item.featured { " *" } else { "" };
            result.push_str(&format!(
                "\n{} {}{}\n",
                format!("[{number}]").yellow().bold(),
                item.title.white().bold(),
                star.bright_yellow()
            ));

            if !item.excerpt.is_empty() {
                result.push_str(&format!("    {}\n", item.excerpt));
            }

            result.push_str(&format!(
                "    {}: {} | {}: {} | {}: {}\n",
                "Category".green(),
                item.category.bright_white(),
                "By".green(),
                item.author.bright_white(),
                "Date".green(),
                item.date.bright_black()
            ));

            if !item.tags.is_empty() {
                result.push_str(&format!(
                    "    {}: {}\n",
                    "Tags".green(),
                    item.tags.join(", ").bright_magenta()
                ));
            }

            result.push_str(&format!(
                "    {}: {}\n",
                "Read".green(),
                format!("blogtools articles get {}", item.slug).cyan()
            ));
        }
    }

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&format!(
        "\n{} {}-{} {} {} {}\n",
        "Showing".bright_white(),
        pagination.start_item.to_string().bright_cyan().bold(),
        pagination.end_item.to_string().bright_cyan().bold(),
        "of".bright_white(),
        pagination.total_items.to_string().bright_cyan().bold(),
        "articles".bright_white()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Pages".bright_white(),
        format_window(pagination)
    ));

    if let Some(href) = &pagination.prev_href {
        result.push_str(&format!(
            "  {}: {} ({})\n",
            "Previous page".green(),
            href.cyan(),
            page_command(&output.query, pagination.current_page - 1).bright_black()
        ));
    }
    if let Some(href) = &pagination.next_href {
        result.push_str(&format!(
            "  {}: {} ({})\n",
            "Next page".green(),
            href.cyan(),
            page_command(&output.query, pagination.current_page + 1).bright_black()
        ));
    }

    if let Some(href) = &pagination.first_href {
        result.push_str(&format!("  {}: {}\n", "First page".green(), href.cyan()));
    }
    if let Some(href) = &pagination.last_href {
        result.push_str(&format!("  {}: {}\n", "Last page".green(), href.cyan()));
    }

    result.push_str(&format!(
        "\n{}:\n  {}\n",
        "To get JSON output".bright_white().bold(),
        format!("blogtools articles list '{}' --json", output.query).cyan()
    ));

    result.push('\n');
    result
}
