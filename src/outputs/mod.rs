//! Output generation for a finished [`NewsReport`](crate::models::NewsReport).
//!
//! # Submodules
//!
//! - [`json`]: writes the report to a timestamped JSON file
//! - [`console`]: renders the report as plain text for the terminal
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── news_analysis_Acme_Corp_20250506_143000.json
//! └── summary_20250506_143002.mp3   # only when narration succeeded
//! ```

pub mod console;
pub mod json;
