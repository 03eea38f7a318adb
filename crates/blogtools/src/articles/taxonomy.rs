use super::view::ArticleListView;
use super::{ArticleSource, SourceArgs};
use crate::config::Config;
use crate::prelude::{eprintln, println, *};
use blogtools_core::article::Article;
use blogtools_core::fetch::{FetchRequest, DEFAULT_FETCH_LIMIT};
use blogtools_core::listing::{category_counts, tag_counts, TermCount};

#[derive(Debug, clap::Args, Clone)]
pub struct TaxonomyOptions {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Taxonomy {
    pub categories: Vec<TermCount>,
    pub tags: Vec<TermCount>,
}

impl Taxonomy {
    pub fn from_articles(articles: &[Article]) -> Self {
        Self {
            categories: category_counts(articles),
            tags: tag_counts(articles),
        }
    }
}

pub async fn run(options: TaxonomyOptions, config: Config) -> Result<()> {
    let source = ArticleSource::resolve(options.source.file.as_deref(), &config)?;
    let view = ArticleListView::new(source);

    if view.needs_fetch() {
        view.load(&FetchRequest::new(config.locale, DEFAULT_FETCH_LIMIT))
            .await;
    }

    let snapshot = view.snapshot().await;
    if let Some(error) = snapshot.error() {
        return Err(eyre!("{error}"));
    }

    let taxonomy = Taxonomy::from_articles(snapshot.articles());

    if options.json {
        let json = serde_json::to_string_pretty(&taxonomy)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{json}");
        return Ok(());
    }

    if config.verbose {
        eprintln!("{} articles counted", snapshot.articles().len());
    }

    print_terms("CATEGORY", &taxonomy.categories);
    println!();
    print_terms("TAG", &taxonomy.tags);

    Ok(())
}

fn print_terms(heading: &str, terms: &[TermCount]) {
    let mut table = new_table();
    table.add_row(prettytable::row![heading, "ARTICLES"]);
    for term in terms {
        table.add_row(prettytable::row![term.name, term.count]);
    }
    table.printstd();
}
