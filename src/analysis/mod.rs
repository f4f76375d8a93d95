//! Offline text analysis: no network access happens below this module.
//!
//! - [`sentiment`]: lexicon-tilted sentiment label and confidence
//! - [`text`]: two-sentence summaries and frequency keywords
//! - [`comparative`]: cross-article distribution, divergence and topic overlap

pub mod comparative;
pub mod sentiment;
pub mod text;
