//! Command-line interface definitions.
//!
//! All options can be provided via command-line flags, and the language via
//! an environment variable as well.

use clap::Parser;

/// Command-line arguments for the news digest.
///
/// # Examples
///
/// ```sh
/// # Prompt for the company name
/// entity_news_digest
///
/// # Analyze Tesla, writing the report to ./reports
/// entity_news_digest Tesla -o ./reports
///
/// # Custom tuning, no translation or audio
/// entity_news_digest "Procter & Gamble" -c pipeline.yaml --skip-narration
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Company or organization to search for (prompted for when omitted)
    pub entity: Option<String>,

    /// Output directory for the JSON report and audio file
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Optional path to a YAML pipeline config
    #[arg(short, long)]
    pub config: Option<String>,

    /// Target language for the translated summary and narration
    #[arg(long, env = "SUMMARY_LANGUAGE", default_value = "hi")]
    pub language: String,

    /// Skip translation and text-to-speech
    #[arg(long)]
    pub skip_narration: bool,
}
