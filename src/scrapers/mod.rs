//! HTTP-facing scrapers: search result discovery and article extraction.
//!
//! | Concern | Module | Timeout |
//! |---------|--------|---------|
//! | Discover candidate links for an entity | [`search`] | 15s per surface |
//! | Per-surface result markup | [`surfaces`] | n/a |
//! | Article body and title | [`content`] | 10s per URL |
//!
//! Every request goes through one shared [`reqwest::Client`] carrying a
//! desktop browser user agent, since several search surfaces serve an empty
//! page to unknown clients. Failures are returned as [`NewsError`] and turned
//! into "no data from this source" by the caller; nothing here retries.

pub mod content;
pub mod search;
pub mod surfaces;

use crate::error::NewsError;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;
use tracing::{debug, instrument};

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Build the shared HTTP client.
pub fn build_client() -> Result<Client, NewsError> {
    Ok(Client::builder().user_agent(BROWSER_USER_AGENT).build()?)
}

/// GET a page and return its body, treating non-2xx as an error.
#[instrument(level = "debug", skip(client))]
pub(crate) async fn get_html(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<String, NewsError> {
    let response = client
        .get(url)
        .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.5")
        .timeout(timeout)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(NewsError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    debug!(bytes = body.len(), "Fetched page");
    Ok(body)
}
