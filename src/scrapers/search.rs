//! Multi-surface search aggregation.
//!
//! Surfaces in [`QUERY_BATTERY`] are queried one after another with a fixed
//! pause in between. A surface that fails or returns unexpected markup
//! contributes no links; it never aborts the run. Collection stops once the
//! discovery ceiling is reached, then social-media hosts are removed and the
//! list is cut to the result ceiling. Links keep their discovery order.

use crate::config::PipelineConfig;
use crate::error::NewsError;
use crate::models::SearchResultSet;
use crate::scrapers::get_html;
use crate::scrapers::surfaces::{QUERY_BATTERY, Surface};
use crate::utils::hostname;
use reqwest::Client;
use scraper::Html;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct SearchAggregator {
    client: Client,
    config: Arc<PipelineConfig>,
}

impl SearchAggregator {
    pub fn new(client: Client, config: Arc<PipelineConfig>) -> Self {
        Self { client, config }
    }

    /// Discover candidate article links for `entity`.
    #[instrument(level = "info", skip(self))]
    pub async fn search_news(&self, entity: &str) -> SearchResultSet {
        let ceiling = self.config.discovery_ceiling;
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for (index, &(surface, suffix)) in QUERY_BATTERY.iter().enumerate() {
            if index > 0 && !self.config.surface_pause().is_zero() {
                sleep(self.config.surface_pause()).await;
            }

            let url = surface.query_url(&self.config.endpoints, entity, suffix);
            let found = match self.query_surface(surface, &url).await {
                Ok(found) => found,
                Err(e) => {
                    warn!(%url, error = %e, "Search surface failed; moving on");
                    continue;
                }
            };

            let before = links.len();
            for link in found {
                if links.len() >= ceiling {
                    break;
                }
                if seen.insert(link.clone()) {
                    links.push(link);
                }
            }
            info!(?surface, %url, new = links.len() - before, total = links.len(), "Collected links");

            if links.len() >= ceiling {
                debug!(ceiling, "Discovery ceiling reached");
                break;
            }
        }

        let links = filter_links(links, &self.config.excluded_domains, self.config.result_ceiling);
        info!(count = links.len(), "Search complete");
        SearchResultSet { links }
    }

    async fn query_surface(&self, surface: Surface, url: &str) -> Result<Vec<String>, NewsError> {
        let html = get_html(&self.client, url, self.config.search_timeout()).await?;
        Ok(parse_result_page(surface, &html, &self.config))
    }
}

fn parse_result_page(surface: Surface, html: &str, config: &PipelineConfig) -> Vec<String> {
    let document = Html::parse_document(html);
    surface.parser(&config.endpoints).extract_links(&document)
}

/// Drop unparsable links and links whose host contains an excluded domain,
/// then keep the first `ceiling`.
pub fn filter_links(links: Vec<String>, excluded: &[String], ceiling: usize) -> Vec<String> {
    links
        .into_iter()
        .filter(|link| {
            let host = hostname(link).to_lowercase();
            if host.is_empty() {
                debug!(%link, "Dropping link without a host");
                return false;
            }
            !excluded.iter().any(|domain| host.contains(domain.as_str()))
        })
        .take(ceiling)
        .collect()
}
