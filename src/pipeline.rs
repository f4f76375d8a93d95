//! Article pipeline: search, then fetch and analyze every link concurrently.
//!
//! Each URL is processed independently on a bounded pool of `workers`
//! in-flight futures. A URL that fails to load or has no body text produces no
//! record and does not affect the others. Results arrive in completion order,
//! not input order.

use crate::analysis::sentiment::SentimentScorer;
use crate::analysis::text::{extract_keywords, summarize};
use crate::config::{Lexicon, PipelineConfig};
use crate::error::NewsError;
use crate::models::ArticleRecord;
use crate::scrapers::content::{ContentExtractor, ExtractedArticle};
use crate::scrapers::search::SearchAggregator;
use crate::utils::{char_prefix, hostname};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub struct NewsPipeline {
    search: SearchAggregator,
    extractor: ContentExtractor,
    scorer: SentimentScorer,
    lexicon: Arc<Lexicon>,
    workers: usize,
    content_window: usize,
}

impl NewsPipeline {
    pub fn new(client: Client, config: Arc<PipelineConfig>) -> Self {
        let lexicon = Arc::new(config.lexicon.clone());
        Self {
            search: SearchAggregator::new(client.clone(), Arc::clone(&config)),
            extractor: ContentExtractor::new(client, config.content_timeout()),
            scorer: SentimentScorer::new(Arc::clone(&lexicon)),
            lexicon,
            workers: config.workers.max(1),
            content_window: config.content_window,
        }
    }

    /// Search for `entity` and process every link found.
    ///
    /// # Errors
    ///
    /// [`NewsError::NoArticles`] when search finds nothing or no link yields
    /// an article. Per-link failures are only logged.
    #[instrument(level = "info", skip(self))]
    pub async fn process_news(&self, entity: &str) -> Result<Vec<ArticleRecord>, NewsError> {
        let results = self.search.search_news(entity).await;
        if results.is_empty() {
            warn!("Search returned no links");
            return Err(NewsError::NoArticles {
                entity: entity.to_string(),
            });
        }

        let records = self.process_urls(&results.links).await;
        if records.is_empty() {
            warn!(links = results.len(), "No link produced an article");
            return Err(NewsError::NoArticles {
                entity: entity.to_string(),
            });
        }
        Ok(records)
    }

    /// Process URLs concurrently, keeping only successful records.
    #[instrument(level = "info", skip_all, fields(count = urls.len(), workers = self.workers))]
    pub async fn process_urls(&self, urls: &[String]) -> Vec<ArticleRecord> {
        let records: Vec<ArticleRecord> = stream::iter(urls)
            .map(|url| async move {
                match self.process_url(url).await {
                    Ok(Some(record)) => {
                        info!(%url, sentiment = %record.sentiment, "Processed article");
                        Some(record)
                    }
                    Ok(None) => {
                        warn!(%url, "Article produced no content; skipping");
                        None
                    }
                    Err(e) => {
                        error!(%url, error = %e, "Article fetch failed; skipping");
                        None
                    }
                }
            })
            .buffer_unordered(self.workers)
            .filter_map(std::future::ready)
            .collect()
            .await;

        info!(
            total = urls.len(),
            successful = records.len(),
            failed = urls.len() - records.len(),
            "Completed article processing"
        );
        records
    }

    async fn process_url(&self, url: &str) -> Result<Option<ArticleRecord>, NewsError> {
        debug!(%url, "Processing");
        let article = self.extractor.fetch_article(url).await?;
        Ok(article.map(|article| self.build_record(url, article)))
    }

    /// Summarize, tag and score an extracted article.
    pub fn build_record(&self, url: &str, article: ExtractedArticle) -> ArticleRecord {
        let scored_text = format!(
            "{} {}",
            article.title,
            char_prefix(&article.content, self.content_window)
        );
        let score = self.scorer.score(&scored_text);
        ArticleRecord {
            summary: summarize(&article.content),
            keywords: extract_keywords(&article.content, &self.lexicon),
            sentiment: score.sentiment,
            confidence: score.confidence,
            link: url.to_string(),
            source: hostname(url),
            title: article.title,
        }
    }
}
