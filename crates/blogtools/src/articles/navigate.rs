use super::list::{list_articles_data, ListOptions};
use super::SourceArgs;
use crate::config::Config;
use crate::prelude::{println, *};
use blogtools_core::fetch::DEFAULT_FETCH_LIMIT;
use blogtools_core::pagination::{Navigator, PaginationController};
use blogtools_core::query::QueryParams;
use colored::Colorize;

#[derive(Debug, clap::Args, Clone)]
pub struct NavigateOptions {
    /// Current URL query string ("" for none)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Target page number(s); each move starts from the previous result
    #[arg(value_name = "PAGE", required = true, num_args = 1..)]
    pub pages: Vec<usize>,

    /// Only count featured articles
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
}

/// Outcome of one requested move
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NavigationStep {
    pub page: usize,
    pub href: Option<String>,
}

pub async fn run(options: NavigateOptions, config: Config) -> Result<()> {
    for step in navigate_data(&options, &config).await? {
        match step.href {
            Some(href) => println!("{} {}", format!("page {}", step.page).green(), href),
            None => println!(
                "{} {}",
                format!("page {}", step.page).yellow(),
                "no-op".bright_black()
            ),
        }
    }

    Ok(())
}

/// Load the list the same way `list` does, then apply the page moves
pub async fn navigate_data(
    options: &NavigateOptions,
    config: &Config,
) -> Result<Vec<NavigationStep>> {
    let list_options = ListOptions {
        query: options.query.clone(),
        featured_only: options.featured_only,
        base_path: options.base_path.clone(),
        limit: options.limit,
        source: options.source.clone(),
        json: false,
    };
    let output = list_articles_data(&list_options, config).await?;

    let base_path = options
        .base_path
        .clone()
        .unwrap_or_else(|| config.blog_path());
    let controller = PaginationController::new(
        output.pagination.current_page,
        output.pagination.total_pages,
        output.pagination.total_items,
        config.per_page,
        base_path,
        config.max_visible,
    );

    Ok(navigate_pages(
        &controller,
        QueryParams::parse(&options.query),
        &options.pages,
    ))
}

/// Apply page moves through one navigator
///
/// The controller's current page follows each successful move so a repeated
/// target is a no-op.
pub fn navigate_pages(
    controller: &PaginationController,
    query: QueryParams,
    pages: &[usize],
) -> Vec<NavigationStep> {
    let mut navigator = Navigator::new(query);
    let mut controller = controller.clone();

    pages
        .iter()
        .map(|&page| {
            let href = navigator
                .navigate_to_page(&controller, page)
                .map(str::to_string);
            if href.is_some() {
                controller.current_page = page;
            }
            NavigationStep { page, href }
        })
        .collect()
}
