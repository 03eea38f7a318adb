use blogtools_core::fetch::FetchError;
use blogtools_core::optimistic::OptimisticError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Failed to read articles file {path}: {reason}")]
    ArticlesFile { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Counter(#[from] OptimisticError),
}
