//! Runtime configuration for the pipeline.
//!
//! Everything here is built once at startup and then only read. The defaults
//! reproduce the stock behaviour; a YAML file passed with `--config` may
//! override any subset of fields:
//!
//! ```yaml
//! workers: 8
//! surface_pause_ms: 2000
//! lexicon:
//!   positive_terms: [growth, profit, record]
//! ```

use crate::error::NewsError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, instrument};

/// Tunables for search, extraction and the worker pool.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Timeout for a single article fetch.
    pub content_timeout_secs: u64,
    /// Timeout for a single search surface query.
    pub search_timeout_secs: u64,
    /// Number of URLs processed concurrently.
    pub workers: usize,
    /// Link collection stops once this many unique links are found.
    pub discovery_ceiling: usize,
    /// Links kept after social-media filtering.
    pub result_ceiling: usize,
    /// Pause between consecutive surface queries.
    pub surface_pause_ms: u64,
    /// Characters of body text scored together with the title.
    pub content_window: usize,
    /// Hostname fragments that are never kept as results.
    pub excluded_domains: Vec<String>,
    pub endpoints: Endpoints,
    pub lexicon: Lexicon,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            content_timeout_secs: 10,
            search_timeout_secs: 15,
            workers: 5,
            discovery_ceiling: 30,
            result_ceiling: 15,
            surface_pause_ms: 1000,
            content_window: 500,
            excluded_domains: [
                "twitter.com",
                "facebook.com",
                "instagram.com",
                "youtube.com",
                "linkedin.com",
            ]
            .map(String::from)
            .to_vec(),
            endpoints: Endpoints::default(),
            lexicon: Lexicon::default(),
        }
    }
}

impl PipelineConfig {
    /// Load the config from an optional YAML file, falling back to defaults.
    #[instrument(level = "info")]
    pub fn load(path: Option<&str>) -> Result<Self, NewsError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&raw).map_err(|source| NewsError::Config {
            path: path.to_string(),
            source,
        })?;
        info!(path, workers = config.workers, "Loaded pipeline config");
        Ok(config)
    }

    pub fn content_timeout(&self) -> Duration {
        Duration::from_secs(self.content_timeout_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn surface_pause(&self) -> Duration {
        Duration::from_millis(self.surface_pause_ms)
    }
}

/// Base URLs of the external services. Overridable so tests can point them
/// at a local mock server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Endpoints {
    pub bing: String,
    pub google_news: String,
    pub duckduckgo: String,
    pub translate: String,
    pub tts: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            bing: "https://www.bing.com".to_string(),
            google_news: "https://news.google.com".to_string(),
            duckduckgo: "https://duckduckgo.com".to_string(),
            translate: "https://translate.googleapis.com".to_string(),
            tts: "https://translate.google.com".to_string(),
        }
    }
}

/// Fixed vocabularies used by the sentiment scorer and keyword extractor.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Lexicon {
    pub positive_terms: Vec<String>,
    pub negative_terms: Vec<String>,
    pub stop_words: HashSet<String>,
}

const POSITIVE_TERMS: &[&str] = &[
    "growth", "profit", "success", "innovation", "launch", "partnership",
    "achievement", "record", "breakthrough", "leading", "expansion", "improvement",
    "strong", "positive", "rise", "up", "gain", "boost", "exceed", "beat",
    "opportunity", "advance", "milestone", "award", "celebrate", "strengthen",
    "surpass", "outperform", "win", "best", "excellent", "superior", "promising",
];

const NEGATIVE_TERMS: &[&str] = &[
    "challenge", "controversy", "problem", "issue", "decline", "drop", "loss",
    "debt", "crisis", "risk", "trouble", "fail", "poor", "weak", "worse",
    "criticism", "dispute", "lawsuit", "scandal", "investigation", "concern",
    "threat", "pressure", "violation", "penalty", "fine", "warning", "struggle",
    "crash", "bankruptcy", "layoff", "downgrade", "recall", "deficit", "bearish",
];

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of",
    "with", "by", "from", "up", "about", "into", "over", "after", "this", "that",
    "these", "those", "has", "was", "said", "says", "will", "would", "could",
    "should", "may", "might", "must", "can",
];

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive_terms: POSITIVE_TERMS.iter().map(|t| t.to_string()).collect(),
            negative_terms: NEGATIVE_TERMS.iter().map(|t| t.to_string()).collect(),
            stop_words: STOP_WORDS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Lexicon {
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}
