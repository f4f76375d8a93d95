//! Data models for processed articles and the reports derived from them.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleRecord`]: one successfully processed article
//! - [`SearchResultSet`]: candidate links discovered for an entity
//! - [`ComparativeReport`]: cross-article sentiment and topic comparison
//! - [`FinalSummary`]: narrative summary plus optional translation and audio
//! - [`NewsReport`]: the document written to disk by the CLI

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment label assigned to an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

/// A single article after extraction, summarization and scoring.
///
/// Records are built once by the pipeline and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleRecord {
    pub title: String,
    pub summary: String,
    pub link: String,
    /// At most five keywords, most frequent first.
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
    /// Heuristic strength of the label, rounded to two decimals.
    /// Not a calibrated probability.
    pub confidence: f64,
    /// Hostname of `link`.
    pub source: String,
}

/// Unique candidate links in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchResultSet {
    pub links: Vec<String>,
}

impl SearchResultSet {
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Percentage of articles carrying each label, formatted like `"66.67%"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SentimentDistribution {
    pub positive: String,
    pub negative: String,
    pub neutral: String,
}

/// Keyword divergence between two articles.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CoverageDifference {
    pub comparison: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TopicOverlap {
    /// Keywords present in every article.
    pub common_topics: Vec<String>,
    /// All other keywords seen in at least one article.
    pub unique_topics: Vec<String>,
}

/// Cross-article comparison, always recomputed from the current record list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComparativeReport {
    pub sentiment_distribution: SentimentDistribution,
    pub coverage_differences: Vec<CoverageDifference>,
    pub topic_overlap: TopicOverlap,
}

/// Narrative summary of the whole article set.
///
/// `translated_summary` and `narration` are filled in by the translate/narrate
/// service and stay `None` when it fails. The fields are written at the top
/// level of a [`NewsReport`] as `final_summary`, `translated_summary` and
/// `audio_file`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FinalSummary {
    #[serde(rename = "final_summary")]
    pub text_summary: String,
    #[serde(default)]
    pub translated_summary: Option<String>,
    /// Path of the generated audio file.
    #[serde(rename = "audio_file", default)]
    pub narration: Option<String>,
}

impl FinalSummary {
    pub fn text_only(text_summary: String) -> Self {
        Self {
            text_summary,
            translated_summary: None,
            narration: None,
        }
    }
}

/// Everything produced for one entity, as written to the JSON output file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsReport {
    pub company: String,
    /// Local time of the run, `%Y-%m-%d %H:%M:%S`.
    pub timestamp: String,
    pub articles: Vec<ArticleRecord>,
    pub comparative_analysis: Option<ComparativeReport>,
    #[serde(flatten)]
    pub final_summary: FinalSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ArticleRecord {
        ArticleRecord {
            title: "Acme posts record quarter".to_string(),
            summary: "Acme grew. Profits rose.".to_string(),
            link: "https://news.example.com/acme".to_string(),
            keywords: vec!["acme".to_string(), "quarter".to_string()],
            sentiment: Sentiment::Positive,
            confidence: 0.67,
            source: "news.example.com".to_string(),
        }
    }

    #[test]
    fn test_sentiment_display() {
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
        assert_eq!(Sentiment::Negative.to_string(), "Negative");
        assert_eq!(Sentiment::Neutral.to_string(), "Neutral");
    }

    #[test]
    fn test_article_record_serialization() {
        let json = serde_json::to_string(&record()).unwrap();
        assert!(json.contains("\"sentiment\":\"Positive\""));
        assert!(json.contains("\"confidence\":0.67"));
        assert!(json.contains("\"source\":\"news.example.com\""));
    }

    #[test]
    fn test_final_summary_text_only_serializes_nulls() {
        let summary = FinalSummary::text_only("Nothing to report.".to_string());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["final_summary"], "Nothing to report.");
        assert!(json["translated_summary"].is_null());
        assert!(json["audio_file"].is_null());
    }

    #[test]
    fn test_news_report_deserialization() {
        let json = r#"{
            "company": "Acme",
            "timestamp": "2025-05-06 14:30:00",
            "articles": [],
            "comparative_analysis": null,
            "final_summary": "No articles available for summary.",
            "translated_summary": null,
            "audio_file": null
        }"#;

        let report: NewsReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.company, "Acme");
        assert!(report.articles.is_empty());
        assert!(report.comparative_analysis.is_none());
        assert_eq!(report.final_summary, FinalSummary::text_only("No articles available for summary.".to_string()));
    }

    #[test]
    fn test_news_report_top_level_keys() {
        let report = NewsReport {
            company: "Acme".to_string(),
            timestamp: "2025-05-06 14:30:00".to_string(),
            articles: vec![record()],
            comparative_analysis: None,
            final_summary: FinalSummary {
                text_summary: "Mostly positive.".to_string(),
                translated_summary: Some("ज़्यादातर सकारात्मक।".to_string()),
                narration: Some("./summary_20250506_143000.mp3".to_string()),
            },
        };

        let json = serde_json::to_value(&report).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "articles",
                "audio_file",
                "company",
                "comparative_analysis",
                "final_summary",
                "timestamp",
                "translated_summary",
            ]
        );
        assert_eq!(json["final_summary"], "Mostly positive.");
        assert_eq!(json["translated_summary"], "ज़्यादातर सकारात्मक।");
        assert_eq!(json["audio_file"], "./summary_20250506_143000.mp3");
    }

    #[test]
    fn test_search_result_set_len() {
        let set = SearchResultSet {
            links: vec!["https://a.example".to_string()],
        };
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
        assert!(SearchResultSet::default().is_empty());
    }
}
