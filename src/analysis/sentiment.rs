//! Lexical sentiment scoring for news articles.
//!
//! A general-purpose VADER pass supplies polarity and subjectivity; a
//! business vocabulary from the [`Lexicon`] then tilts the result. Terms found
//! in the first twenty words (roughly the headline) are counted a second time.
//!
//! ```text
//! score = 0.4 * polarity + 0.3 * (pos - neg) + 0.3 * (title_pos - title_neg)
//! ```
//!
//! The output is a best-effort label, not a trained classifier.

use crate::config::Lexicon;
use crate::models::Sentiment;
use std::sync::Arc;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Words at the start of the text treated as the title window.
const TITLE_WINDOW: usize = 20;

/// Label and heuristic confidence for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub sentiment: Sentiment,
    /// Rounded to two decimals. Usually in `[0, 1]` but not bounded above.
    pub confidence: f64,
}

/// Base polarity in `[-1, 1]` and subjectivity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Polarity {
    polarity: f64,
    subjectivity: f64,
}

/// Deterministic scorer; holds no state besides its read-only vocabularies.
pub struct SentimentScorer {
    lexicon: Arc<Lexicon>,
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentScorer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// VADER compound score as polarity; the share of non-neutral tokens as
    /// subjectivity.
    fn polarity(&self, text: &str) -> Polarity {
        if text.trim().is_empty() {
            return Polarity {
                polarity: 0.0,
                subjectivity: 0.0,
            };
        }
        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
        Polarity {
            polarity: get("compound").clamp(-1.0, 1.0),
            subjectivity: (get("pos") + get("neg")).clamp(0.0, 1.0),
        }
    }

    /// Number of distinct terms occurring anywhere in `haystack`.
    fn hits(terms: &[String], haystack: &str) -> i64 {
        terms.iter().filter(|term| haystack.contains(term.as_str())).count() as i64
    }

    /// Score arbitrary text. Title plus lead paragraph works best.
    pub fn score(&self, text: &str) -> SentimentScore {
        let Polarity {
            polarity,
            subjectivity,
        } = self.polarity(text);

        let lower = text.to_lowercase();
        let title_window = lower
            .split_whitespace()
            .take(TITLE_WINDOW)
            .collect::<Vec<_>>()
            .join(" ");

        let pos = Self::hits(&self.lexicon.positive_terms, &lower);
        let neg = Self::hits(&self.lexicon.negative_terms, &lower);
        let title_pos = Self::hits(&self.lexicon.positive_terms, &title_window);
        let title_neg = Self::hits(&self.lexicon.negative_terms, &title_window);

        let score =
            polarity * 0.4 + (pos - neg) as f64 * 0.3 + (title_pos - title_neg) as f64 * 0.3;

        let sentiment = if score > 0.1 || pos as f64 > neg as f64 * 1.5 {
            Sentiment::Positive
        } else if score < -0.1 || neg > pos {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };

        let confidence = (score.abs() + (1.0 - subjectivity) + (pos - neg).abs() as f64 / 10.0) / 3.0;

        SentimentScore {
            sentiment,
            confidence: (confidence * 100.0).round() / 100.0,
        }
    }
}
