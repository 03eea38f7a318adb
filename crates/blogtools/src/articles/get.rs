use super::{article_error, client, load_articles_file, SourceArgs};
use crate::config::Config;
use crate::prelude::{eprintln, print, println, *};
use blogtools_core::article::{format_date, Article, Locale};
use colored::Colorize;

#[derive(Debug, clap::Args, Clone)]
pub struct GetOptions {
    /// Article slug
    #[arg(value_name = "SLUG")]
    pub slug: String,

    #[clap(flatten)]
    pub source: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: GetOptions, config: Config) -> Result<()> {
    if config.verbose {
        eprintln!("Fetching article {}...", options.slug);
    }

    let article = get_article_data(&options, &config).await?;

    if options.json {
        let json = serde_json::to_string_pretty(&article)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{json}");
    } else {
        print!("{}", format_article_text(&article, config.locale));
    }

    Ok(())
}

pub async fn get_article_data(options: &GetOptions, config: &Config) -> Result<Article, Error> {
    match options.source.file.as_deref() {
        Some(path) => load_articles_file(path)?
            .into_iter()
            .find(|a| a.slug == options.slug)
            .ok_or_else(|| Error::NotFound(options.slug.clone())),
        None => {
            let http = reqwest::Client::new();
            client::fetch_article(&http, &config.api_url, &options.slug)
                .await
                .map_err(|err| article_error(&options.slug, err))
        }
    }
}

fn format_article_text(article: &Article, locale: Locale) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("{}\n", article.title(locale).bright_cyan().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "{}: {} | {}: {} | {}: {}\n",
        "By".green(),
        article.author.bright_white(),
        "Date".green(),
        format_date(&article.created_at).bright_black(),
        "Category".green(),
        article.category.bright_white()
    ));

    if !article.tags.is_empty() {
        result.push_str(&format!(
            "{}: {}\n",
            "Tags".green(),
            article.tags.join(", ").bright_magenta()
        ));
    }

    result.push_str(&format!(
        "{}: {} | {}: {}\n",
        "Likes".green(),
        article.likes,
        "Shares".green(),
        article.shares
    ));

    let excerpt = article.excerpt(locale);
    if !excerpt.is_empty() {
        result.push_str(&format!("\n{}\n", excerpt.italic()));
    }

    result.push_str(&format!("\n{}\n\n", article.content(locale)));
    result
}
