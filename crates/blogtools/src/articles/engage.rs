use super::{article_error, client};
use crate::config::Config;
use crate::prelude::{eprintln, println, *};
use blogtools_core::fetch::Counter;
use blogtools_core::optimistic::{OptimisticCounter, UpdateState};
use colored::Colorize;

#[derive(Debug, clap::Args, Clone)]
pub struct EngageOptions {
    /// Article slug
    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// Record a share instead of a like
    #[arg(long)]
    pub share: bool,
}

impl EngageOptions {
    fn counter(&self) -> Counter {
        if self.share {
            Counter::Share
        } else {
            Counter::Like
        }
    }
}

/// Result of one optimistic update
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EngageOutcome {
    pub counter: Counter,
    /// Value shown while the request was in flight
    pub optimistic: u64,
    pub state: UpdateState,
    /// Value to display once the request settled
    pub value: u64,
    pub error: Option<String>,
}

pub async fn run(options: EngageOptions, config: Config) -> Result<()> {
    let outcome = engage(&options, &config).await?;

    if config.verbose {
        eprintln!("Optimistic {}: {}", outcome.counter.as_str(), outcome.optimistic);
    }

    match &outcome.error {
        None => println!(
            "{} {}: {}",
            options.slug.bright_white().bold(),
            outcome.counter.as_str().green(),
            outcome.value
        ),
        Some(error) => println!(
            "{} {}: {} ({})",
            options.slug.bright_white().bold(),
            outcome.counter.as_str().yellow(),
            outcome.value,
            error.red()
        ),
    }

    Ok(())
}

/// Bump a counter optimistically, then confirm it with the API
///
/// Only a failure to read the article is an error; a rejected update rolls
/// the counter back and is reported in the outcome.
pub async fn engage(options: &EngageOptions, config: &Config) -> Result<EngageOutcome, Error> {
    let http = reqwest::Client::new();
    let counter = options.counter();

    let article = client::fetch_article(&http, &config.api_url, &options.slug)
        .await
        .map_err(|err| article_error(&options.slug, err))?;

    let mut state = OptimisticCounter::new(counter.value(&article));
    let optimistic = state.begin(1)?;

    let error = match client::record_counter(&http, &config.api_url, &options.slug, counter).await
    {
        Ok(response) => {
            state.commit(counter.value_in(&response))?;
            None
        }
        Err(err) => {
            log::warn!("Failed to record {} for {}: {err}", counter.as_str(), options.slug);
            state.rollback()?;
            Some(err.to_string())
        }
    };

    Ok(EngageOutcome {
        counter,
        optimistic,
        state: state.state(),
        value: state.shown(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::articles::test_support::article;
    use crate::config::test_global;
    use crate::serve::test_server;

    fn options(slug: &str, share: bool) -> EngageOptions {
        EngageOptions {
            slug: slug.to_string(),
            share,
        }
    }

    #[tokio::test]
    async fn test_engage_commits_server_value() {
        let mut liked = article("liked", 1);
        liked.likes = 41;
        let base_url = test_server::spawn(vec![liked]).await;
        let config = Config::from_global(&test_global(&base_url)).unwrap();

        let outcome = engage(&options("liked", false), &config).await.unwrap();

        assert_eq!(outcome.counter, Counter::Like);
        assert_eq!(outcome.optimistic, 42);
        assert_eq!(outcome.state, UpdateState::Committed);
        assert_eq!(outcome.value, 42);
        assert_eq!(outcome.error, None);
    }

    #[tokio::test]
    async fn test_engage_share() {
        let base_url = test_server::spawn(vec![article("shared", 1)]).await;
        let config = Config::from_global(&test_global(&base_url)).unwrap();

        engage(&options("shared", true), &config).await.unwrap();
        let outcome = engage(&options("shared", true), &config).await.unwrap();

        assert_eq!(outcome.counter, Counter::Share);
        assert_eq!(outcome.value, 2);
    }

    #[tokio::test]
    async fn test_engage_unknown_slug() {
        let base_url = test_server::spawn(vec![article("known", 1)]).await;
        let config = Config::from_global(&test_global(&base_url)).unwrap();

        assert!(matches!(
            engage(&options("unknown", false), &config).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_engage_rolls_back_when_update_fails() {
        let base_url = test_server::spawn_read_only(vec![article("frozen", 1)]).await;
        let config = Config::from_global(&test_global(&base_url)).unwrap();

        let outcome = engage(&options("frozen", false), &config).await.unwrap();

        assert_eq!(outcome.optimistic, 1);
        assert_eq!(outcome.state, UpdateState::RolledBack);
        assert_eq!(outcome.value, 0);
        assert!(outcome.error.is_some());
    }
}
