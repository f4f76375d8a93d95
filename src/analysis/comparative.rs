//! Cross-article comparison and the narrative summary.
//!
//! Nothing here is cached: every call derives its result from the record list
//! it is given.

use crate::analysis::text::most_common;
use crate::models::{
    ArticleRecord, ComparativeReport, CoverageDifference, Sentiment, SentimentDistribution,
    TopicOverlap,
};
use itertools::Itertools;

/// Pairwise comparisons kept in the report, in nested-loop order.
const MAX_COVERAGE_DIFFERENCES: usize = 2;
/// Topics named in the narrative summary.
const NARRATIVE_TOPICS: usize = 3;

pub const NO_ARTICLES_SUMMARY: &str = "No articles available for summary.";

fn count(articles: &[ArticleRecord], sentiment: Sentiment) -> usize {
    articles.iter().filter(|a| a.sentiment == sentiment).count()
}

fn percentage(part: usize, total: usize) -> f64 {
    part as f64 / total as f64 * 100.0
}

/// Share of each label, two decimals. `articles` must not be empty.
fn sentiment_distribution(articles: &[ArticleRecord]) -> SentimentDistribution {
    let total = articles.len();
    let pct = |s| format!("{:.2}%", percentage(count(articles, s), total));
    SentimentDistribution {
        positive: pct(Sentiment::Positive),
        negative: pct(Sentiment::Negative),
        neutral: pct(Sentiment::Neutral),
    }
}

/// Keywords of `a` that `b` lacks, in `a`'s order.
fn keywords_missing_from(a: &ArticleRecord, b: &ArticleRecord) -> String {
    a.keywords
        .iter()
        .filter(|k| !b.keywords.contains(k))
        .join(", ")
}

/// The first two pairs `(i, j)`, `i < j`, in input order. No ranking is applied.
fn coverage_differences(articles: &[ArticleRecord]) -> Vec<CoverageDifference> {
    (0..articles.len())
        .tuple_combinations()
        .take(MAX_COVERAGE_DIFFERENCES)
        .map(|(i, j)| {
            let (a, b) = (&articles[i], &articles[j]);
            CoverageDifference {
                comparison: format!(
                    "Article {} focuses on {}, while Article {} discusses {}",
                    i + 1,
                    keywords_missing_from(a, b),
                    j + 1,
                    keywords_missing_from(b, a),
                ),
                impact: format!(
                    "Different aspects affecting market perception: {} vs {} sentiment",
                    a.sentiment, b.sentiment
                ),
            }
        })
        .collect()
}

/// Intersection of all keyword sets, and everything else in the union.
///
/// Common topics follow the first article's keyword order; unique topics
/// follow first appearance across the list.
fn topic_overlap(articles: &[ArticleRecord]) -> TopicOverlap {
    let Some(first) = articles.first() else {
        return TopicOverlap {
            common_topics: Vec::new(),
            unique_topics: Vec::new(),
        };
    };

    let common_topics: Vec<String> = first
        .keywords
        .iter()
        .filter(|k| articles.iter().all(|a| a.keywords.contains(k)))
        .unique()
        .cloned()
        .collect();

    let unique_topics = articles
        .iter()
        .flat_map(|a| a.keywords.iter())
        .unique()
        .filter(|k| !common_topics.contains(k))
        .cloned()
        .collect();

    TopicOverlap {
        common_topics,
        unique_topics,
    }
}

/// Compare the article set. Returns `None` for an empty list.
pub fn comparative_analysis(articles: &[ArticleRecord]) -> Option<ComparativeReport> {
    if articles.is_empty() {
        return None;
    }
    Some(ComparativeReport {
        sentiment_distribution: sentiment_distribution(articles),
        coverage_differences: coverage_differences(articles),
        topic_overlap: topic_overlap(articles),
    })
}

/// Compose the English narrative for the whole article set.
pub fn narrative_summary(articles: &[ArticleRecord]) -> String {
    if articles.is_empty() {
        return NO_ARTICLES_SUMMARY.to_string();
    }

    let total = articles.len();
    let positive = count(articles, Sentiment::Positive);
    let negative = count(articles, Sentiment::Negative);
    let topics = most_common(
        articles
            .iter()
            .flat_map(|a| a.keywords.iter().map(String::as_str)),
        NARRATIVE_TOPICS,
    );

    let mut summary = format!(
        "Analysis of {total} recent articles shows {positive} positive and {negative} negative articles. "
    );
    if positive > negative {
        summary.push_str(&format!(
            "The company's latest news coverage is mostly positive ({:.1}%). ",
            percentage(positive, total)
        ));
        summary.push_str("Market sentiment appears favorable, suggesting potential stock growth. ");
    } else if negative > positive {
        summary.push_str(&format!(
            "Recent coverage leans negative ({:.1}%). ",
            percentage(negative, total)
        ));
        summary.push_str("Investors should monitor developments closely. ");
    } else {
        summary.push_str("Coverage shows balanced sentiment. ");
    }
    summary.push_str(&format!("Key topics discussed: {}. ", topics.join(", ")));
    summary.push_str("Market implications depend on how these developments unfold.");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn article(keywords: &[&str], sentiment: Sentiment) -> ArticleRecord {
        ArticleRecord {
            title: "t".to_string(),
            summary: "s".to_string(),
            link: "https://example.com/a".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            sentiment,
            confidence: 0.5,
            source: "example.com".to_string(),
        }
    }

    fn parse_pct(s: &str) -> f64 {
        s.trim_end_matches('%').parse().unwrap()
    }

    #[test]
    fn test_empty_input_has_no_report() {
        assert!(comparative_analysis(&[]).is_none());
        assert_eq!(narrative_summary(&[]), NO_ARTICLES_SUMMARY);
    }

    #[test]
    fn test_topic_overlap_two_articles() {
        let articles = vec![
            article(&["growth", "market"], Sentiment::Positive),
            article(&["market", "risk"], Sentiment::Negative),
        ];
        let report = comparative_analysis(&articles).unwrap();
        assert_eq!(report.topic_overlap.common_topics, vec!["market"]);
        assert_eq!(report.topic_overlap.unique_topics, vec!["growth", "risk"]);
    }

    #[test]
    fn test_single_article_topics_are_all_common() {
        let articles = vec![article(&["alpha", "beta"], Sentiment::Neutral)];
        let report = comparative_analysis(&articles).unwrap();
        assert_eq!(report.topic_overlap.common_topics, vec!["alpha", "beta"]);
        assert!(report.topic_overlap.unique_topics.is_empty());
        assert!(report.coverage_differences.is_empty());
        assert_eq!(report.sentiment_distribution.neutral, "100.00%");
    }

    #[test]
    fn test_topic_set_algebra_holds() {
        let articles = vec![
            article(&["market", "growth", "tesla"], Sentiment::Positive),
            article(&["tesla", "market", "recall"], Sentiment::Negative),
            article(&["market", "tesla", "china"], Sentiment::Neutral),
        ];
        let overlap = comparative_analysis(&articles).unwrap().topic_overlap;
        let common: HashSet<_> = overlap.common_topics.iter().collect();
        let unique: HashSet<_> = overlap.unique_topics.iter().collect();
        let union: HashSet<_> = articles.iter().flat_map(|a| a.keywords.iter()).collect();

        for a in &articles {
            for topic in &common {
                assert!(a.keywords.contains(topic));
            }
        }
        assert!(common.is_disjoint(&unique));
        assert_eq!(common.union(&unique).cloned().collect::<HashSet<_>>(), union);
        assert_eq!(overlap.common_topics, vec!["market", "tesla"]);
    }

    #[test]
    fn test_distribution_sums_to_hundred() {
        let articles = vec![
            article(&["a"], Sentiment::Positive),
            article(&["b"], Sentiment::Positive),
            article(&["c"], Sentiment::Negative),
        ];
        let dist = comparative_analysis(&articles).unwrap().sentiment_distribution;
        assert_eq!(dist.positive, "66.67%");
        assert_eq!(dist.negative, "33.33%");
        assert_eq!(dist.neutral, "0.00%");
        let sum = parse_pct(&dist.positive) + parse_pct(&dist.negative) + parse_pct(&dist.neutral);
        assert!((sum - 100.0).abs() <= 0.02, "sum was {sum}");
    }

    #[test]
    fn test_coverage_differences_length() {
        for n in 0usize..6 {
            let articles: Vec<_> = (0..n).map(|_| article(&["x"], Sentiment::Neutral)).collect();
            let pairs = n * n.saturating_sub(1) / 2;
            assert_eq!(coverage_differences(&articles).len(), pairs.min(2), "n = {n}");
        }
    }

    #[test]
    fn test_coverage_differences_are_positional() {
        let articles = vec![
            article(&["growth", "market"], Sentiment::Positive),
            article(&["market", "risk"], Sentiment::Negative),
            article(&["lawsuit", "recall"], Sentiment::Negative),
        ];
        let diffs = coverage_differences(&articles);
        assert_eq!(
            diffs[0].comparison,
            "Article 1 focuses on growth, while Article 2 discusses risk"
        );
        assert_eq!(
            diffs[0].impact,
            "Different aspects affecting market perception: Positive vs Negative sentiment"
        );
        assert_eq!(
            diffs[1].comparison,
            "Article 1 focuses on growth, market, while Article 3 discusses lawsuit, recall"
        );
    }

    #[test]
    fn test_narrative_mostly_positive() {
        let articles = vec![
            article(&["growth", "market"], Sentiment::Positive),
            article(&["growth", "profit"], Sentiment::Positive),
            article(&["market", "risk"], Sentiment::Negative),
        ];
        let text = narrative_summary(&articles);
        assert!(text.starts_with(
            "Analysis of 3 recent articles shows 2 positive and 1 negative articles. "
        ));
        assert!(text.contains("mostly positive (66.7%)"));
        assert!(text.contains("Key topics discussed: growth, market, profit. "));
        assert!(text.ends_with("Market implications depend on how these developments unfold."));
    }

    #[test]
    fn test_narrative_negative_and_balanced() {
        let negative = vec![article(&["risk"], Sentiment::Negative)];
        assert!(narrative_summary(&negative).contains("Recent coverage leans negative (100.0%). "));

        let balanced = vec![
            article(&["a"], Sentiment::Positive),
            article(&["b"], Sentiment::Negative),
        ];
        assert!(narrative_summary(&balanced).contains("Coverage shows balanced sentiment. "));
    }
}
