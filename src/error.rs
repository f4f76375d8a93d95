//! Error taxonomy for the news pipeline.
//!
//! Transport and parse failures are produced here but almost never reach the
//! user: the per-surface and per-URL loops log them and move on. The only
//! variant the CLI reports as an outcome is [`NewsError::NoArticles`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to load config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("translate/narrate service error: {0}")]
    Collaborator(String),

    #[error("no news articles found for \"{entity}\"")]
    NoArticles { entity: String },
}
