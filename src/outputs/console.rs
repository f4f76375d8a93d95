//! Plain-text rendering of a report for the terminal.

use crate::models::{ArticleRecord, ComparativeReport, NewsReport};
use std::fmt::Write;

const RULE_WIDTH: usize = 80;

fn render_article(out: &mut String, index: usize, article: &ArticleRecord) {
    let _ = writeln!(out, "Article {index}: {}", article.title);
    let _ = writeln!(out, "Source: {}", article.source);
    let _ = writeln!(out, "Link: {}", article.link);
    let _ = writeln!(out, "Summary: {}", article.summary);
    let _ = writeln!(out, "Keywords: {}", article.keywords.join(", "));
    let _ = writeln!(
        out,
        "Sentiment: {} (Confidence: {:.2})",
        article.sentiment, article.confidence
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
}

fn render_comparison(out: &mut String, analysis: &ComparativeReport) {
    let dist = &analysis.sentiment_distribution;
    let _ = writeln!(out, "== Comparative Analysis ==");
    let _ = writeln!(out, "Positive: {}", dist.positive);
    let _ = writeln!(out, "Negative: {}", dist.negative);
    let _ = writeln!(out, "Neutral: {}", dist.neutral);

    let _ = writeln!(out, "\n-- Coverage Differences --");
    for diff in &analysis.coverage_differences {
        let _ = writeln!(out, "Comparison: {}", diff.comparison);
        let _ = writeln!(out, "Impact: {}", diff.impact);
    }

    let overlap = &analysis.topic_overlap;
    let _ = writeln!(out, "\n-- Topic Analysis --");
    let _ = writeln!(out, "Common Topics: {}", overlap.common_topics.join(", "));
    let _ = writeln!(out, "Unique Topics: {}", overlap.unique_topics.join(", "));
}

/// Render the whole report as it is printed by the CLI.
pub fn render_report(report: &NewsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "News analysis for {} ({})", report.company, report.timestamp);
    let _ = writeln!(out, "Fetched {} articles\n", report.articles.len());

    for (i, article) in report.articles.iter().enumerate() {
        render_article(&mut out, i + 1, article);
    }

    if let Some(analysis) = &report.comparative_analysis {
        render_comparison(&mut out, analysis);
    }

    let summary = &report.final_summary;
    let _ = writeln!(out, "\n== Final Summary ==\n{}", summary.text_summary);
    if let Some(translated) = &summary.translated_summary {
        let _ = writeln!(out, "\n== Translated Summary ==\n{translated}");
    }
    if let Some(audio) = &summary.narration {
        let _ = writeln!(out, "Audio: {audio}");
    }
    out
}
