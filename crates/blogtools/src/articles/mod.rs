use crate::config::Config;
use crate::prelude::{eprintln, *};
use blogtools_core::article::Article;
use blogtools_core::fetch::{FetchError, FetchRequest};
use std::path::{Path, PathBuf};

pub mod client;
pub mod engage;
pub mod get;
pub mod list;
pub mod navigate;
pub mod taxonomy;
pub mod validate;
pub mod view;

#[derive(Debug, clap::Parser)]
#[command(name = "articles")]
#[command(about = "Article listing, lookup and navigation")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List articles filtered and paginated by a URL query string
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Show the URL a page navigation would move to
    #[clap(name = "navigate")]
    Navigate(navigate::NavigateOptions),

    /// Read a single article by slug
    #[clap(name = "get")]
    Get(get::GetOptions),

    /// Show categories and tags with article counts
    #[clap(name = "taxonomy")]
    Taxonomy(taxonomy::TaxonomyOptions),

    /// Check an articles file for missing translations and duplicate slugs
    #[clap(name = "validate")]
    Validate(validate::ValidateOptions),

    /// Like or share an article
    #[clap(name = "engage")]
    Engage(engage::EngageOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = Config::from_global(&global)?;

    if config.verbose {
        eprintln!("Articles API: {}", config.api_url);
        eprintln!("Locale: {}", config.locale);
        eprintln!();
    }

    match app.command {
        Commands::List(options) => list::run(options, config).await,
        Commands::Navigate(options) => navigate::run(options, config).await,
        Commands::Get(options) => get::run(options, config).await,
        Commands::Taxonomy(options) => taxonomy::run(options, config).await,
        Commands::Validate(options) => validate::run(options),
        Commands::Engage(options) => engage::run(options, config).await,
    }
}

/// Where the article collection comes from
#[derive(Debug, Clone)]
pub enum ArticleSource {
    /// Pre-supplied articles; no request is made
    Initial(Vec<Article>),
    /// The articles API at `base_url`
    Remote {
        client: reqwest::Client,
        base_url: String,
    },
}

impl ArticleSource {
    pub fn remote(base_url: impl Into<String>) -> Self {
        ArticleSource::Remote {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Use the articles file when given, the API otherwise
    pub fn resolve(file: Option<&Path>, config: &Config) -> Result<Self, Error> {
        match file {
            Some(path) => Ok(ArticleSource::Initial(load_articles_file(path)?)),
            None => Ok(ArticleSource::remote(config.api_url.clone())),
        }
    }

    pub async fn load(&self, request: &FetchRequest) -> Result<Vec<Article>, FetchError> {
        match self {
            ArticleSource::Initial(articles) => Ok(articles.clone()),
            ArticleSource::Remote { client, base_url } => {
                client::fetch_articles(client, base_url, request).await
            }
        }
    }
}

/// Map a failed single-article request, turning a 404 into [`Error::NotFound`]
pub fn article_error(slug: &str, err: FetchError) -> Error {
    if err.is_not_found() {
        Error::NotFound(slug.to_string())
    } else {
        Error::from(err)
    }
}

/// Read an articles file: either a bare JSON array or `{"articles": [...]}`
pub fn load_articles_file(path: &Path) -> Result<Vec<Article>, Error> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum ArticlesFile {
        List(Vec<Article>),
        Wrapped { articles: Vec<Article> },
    }

    let file_error = |reason: String| Error::ArticlesFile {
        path: path.display().to_string(),
        reason,
    };

    let raw = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    let parsed: ArticlesFile = serde_json::from_str(&raw).map_err(|e| file_error(e.to_string()))?;

    let articles = match parsed {
        ArticlesFile::List(articles) => articles,
        ArticlesFile::Wrapped { articles } => articles,
    };

    log::debug!("Loaded {} articles from {}", articles.len(), path.display());
    Ok(articles)
}

/// Shared `--file` argument
#[derive(Debug, Clone, clap::Args)]
pub struct SourceArgs {
    /// Read articles from a JSON file instead of the API
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}


#[cfg(test)]
mod tests {
    use super::test_support::articles;
    use super::*;
    use std::io::Write;

    #[test]
    fn test_support_articles_extend_core_fixtures() {
        use blogtools_core::article::{fixtures, validate_collection};

        let collection = articles(4);
        assert!(validate_collection(&collection).is_empty());
        assert_eq!(collection[1].title, fixtures::article("article-2", 2).title);
        assert_eq!(collection[1].category, "wallets");
        assert!(collection[1].featured);
        assert!(!collection[2].featured);
    }

    #[test]
    fn test_load_articles_file_bare_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&articles(3)).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = load_articles_file(file.path()).unwrap();
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn test_load_articles_file_wrapped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({ "articles": articles(2) }).to_string();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = load_articles_file(file.path()).unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_load_articles_file_errors() {
        let missing = load_articles_file(Path::new("/nonexistent/articles.json"));
        assert!(matches!(missing, Err(Error::ArticlesFile { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"posts\": 1}").unwrap();
        assert!(load_articles_file(file.path()).is_err());
    }

    #[tokio::test]
    async fn test_initial_source_skips_fetch() {
        let source = ArticleSource::Initial(articles(4));
        let request = FetchRequest::new(blogtools_core::article::Locale::Es, 1);
        // the limit only applies to remote requests
        assert_eq!(source.load(&request).await.unwrap().len(), 4);
    }
}
