//! JSON output of the full report.
//!
//! One file per run, named after the entity and the local time:
//! `{output_dir}/news_analysis_{entity_slug}_{YYYYmmdd_HHMMSS}.json`.

use crate::models::NewsReport;
use crate::utils::{file_timestamp, slugify};
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Path the report for `company` is written to.
pub fn report_path(output_dir: &str, company: &str, timestamp: &str) -> String {
    format!(
        "{}/news_analysis_{}_{}.json",
        output_dir.trim_end_matches('/'),
        slugify(company),
        timestamp
    )
}

/// Write a [`NewsReport`] as pretty-printed JSON.
///
/// # Returns
///
/// The path of the written file, or an error if directory creation or file
/// writing fails.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_report(report: &NewsReport, output_dir: &str) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(%output_dir, error = %e, "Failed to create output dir");
        return Err(e.into());
    }

    let path = report_path(output_dir, &report.company, &file_timestamp());
    info!(%path, "Writing JSON");
    fs::write(&path, json).await?;
    info!(%path, articles = report.articles.len(), "Wrote report");

    Ok(path)
}
