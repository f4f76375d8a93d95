//! # Entity News Digest
//!
//! Finds recent news articles about a company, scores the sentiment of each
//! one, and compares coverage across the whole set.
//!
//! ## Usage
//!
//! ```sh
//! entity_news_digest Tesla -o ./reports
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Search**: Query Bing News, Google News and DuckDuckGo for candidate links
//! 2. **Processing**: Fetch, summarize, tag and score each link (parallel, 5 at a time)
//! 3. **Comparison**: Sentiment distribution, pairwise keyword divergence, topic overlap
//! 4. **Summary**: Narrative summary, optionally translated and narrated
//! 5. **Output**: Console rendering and a timestamped JSON report

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod narration;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use analysis::comparative::{comparative_analysis, narrative_summary};
use cli::Cli;
use config::PipelineConfig;
use error::NewsError;
use models::{FinalSummary, NewsReport};
use narration::{GoogleNarrator, final_summary};
use outputs::{console, json};
use pipeline::NewsPipeline;
use utils::ensure_writable_dir;

/// Read the entity name from stdin when it wasn't given on the command line.
fn prompt_entity() -> io::Result<String> {
    print!("Enter the company name: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("entity_news_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let config = Arc::new(PipelineConfig::load(args.config.as_deref())?);

    let entity = match args.entity.clone() {
        Some(entity) => entity.trim().to_string(),
        None => prompt_entity()?,
    };
    if entity.is_empty() {
        eprintln!("Please enter a company name.");
        return Ok(());
    }
    info!(%entity, "Analyzing news coverage");

    // ---- Search and process articles ----
    let client = scrapers::build_client()?;
    let pipeline = NewsPipeline::new(client.clone(), Arc::clone(&config));
    let articles = match pipeline.process_news(&entity).await {
        Ok(articles) => articles,
        Err(NewsError::NoArticles { .. }) => {
            println!("No news articles found.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    info!(count = articles.len(), "Articles processed");

    // ---- Compare and summarize ----
    let analysis = comparative_analysis(&articles);
    let text_summary = narrative_summary(&articles);
    let summary = if args.skip_narration {
        FinalSummary::text_only(text_summary)
    } else {
        let narrator = GoogleNarrator::new(client, &config.endpoints, config.search_timeout());
        final_summary(text_summary, &narrator, &args.language, &args.output_dir).await
    };

    let report = NewsReport {
        company: entity,
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        articles,
        comparative_analysis: analysis,
        final_summary: summary,
    };

    // ---- Output ----
    println!("{}", console::render_report(&report));
    match json::write_report(&report, &args.output_dir).await {
        Ok(path) => println!("Report saved to {path}"),
        Err(e) => error!(error = %e, "Failed to write JSON report"),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
