//! Translation and text-to-speech for the final summary.
//!
//! Both services are external and unreliable, so they sit behind the
//! [`Narrator`] trait and every failure degrades to a text-only
//! [`FinalSummary`] instead of failing the run.
//!
//! # Architecture
//!
//! - [`Narrator`]: translate a string, and render a string to an audio file
//! - [`GoogleNarrator`]: the public Google Translate `gtx` and `translate_tts`
//!   endpoints
//! - [`final_summary`]: drives a narrator and assembles the result

use crate::config::Endpoints;
use crate::error::NewsError;
use crate::models::FinalSummary;
use crate::utils::{file_timestamp, truncate_for_log};
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// The TTS endpoint rejects longer inputs, so text is sent in pieces.
const TTS_CHUNK_CHARS: usize = 100;

/// Translate text and render it as speech.
pub trait Narrator {
    /// Translate `text` into `target_lang` (an ISO 639-1 tag such as `hi`).
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, NewsError>;

    /// Render `text` as speech in `lang`, save it under `out_dir` and return
    /// the path of the audio file.
    async fn narrate(&self, text: &str, lang: &str, out_dir: &str) -> Result<String, NewsError>;
}

/// [`Narrator`] backed by Google's unauthenticated translate endpoints.
#[derive(Debug, Clone)]
pub struct GoogleNarrator {
    client: Client,
    translate_base: String,
    tts_base: String,
    timeout: Duration,
}

impl GoogleNarrator {
    pub fn new(client: Client, endpoints: &Endpoints, timeout: Duration) -> Self {
        Self {
            client,
            translate_base: endpoints.translate.trim_end_matches('/').to_string(),
            tts_base: endpoints.tts.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, NewsError> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::UnexpectedStatus {
                status: status.as_u16(),
                url: truncate_for_log(url, 120),
            });
        }
        Ok(response)
    }
}

/// Concatenate the translated segments of a `translate_a/single` response:
/// `[[["translated", "original", ...], ...], ...]`.
fn parse_translation(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    (!text.is_empty()).then_some(text)
}

/// Split text on whitespace into pieces of at most `max` characters.
/// A single word longer than `max` becomes its own piece.
fn chunk_text(text: &str, max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

impl Narrator for GoogleNarrator {
    #[instrument(level = "info", skip_all, fields(%target_lang))]
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, NewsError> {
        let url = format!(
            "{}/translate_a/single?client=gtx&sl=auto&tl={}&dt=t&q={}",
            self.translate_base,
            urlencoding::encode(target_lang),
            urlencoding::encode(text)
        );
        let body: Value = serde_json::from_str(&self.get(&url).await?.text().await?)?;
        let translated = parse_translation(&body).ok_or_else(|| {
            NewsError::Collaborator(format!(
                "unrecognised translation response: {}",
                truncate_for_log(&body.to_string(), 200)
            ))
        })?;
        debug!(chars = translated.chars().count(), "Translated summary");
        Ok(translated)
    }

    #[instrument(level = "info", skip_all, fields(%lang, %out_dir))]
    async fn narrate(&self, text: &str, lang: &str, out_dir: &str) -> Result<String, NewsError> {
        let chunks = chunk_text(text, TTS_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(NewsError::Collaborator("nothing to narrate".to_string()));
        }

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let url = format!(
                "{}/translate_tts?ie=UTF-8&client=tw-ob&tl={}&q={}&total={}&idx={}&textlen={}",
                self.tts_base,
                urlencoding::encode(lang),
                urlencoding::encode(chunk),
                chunks.len(),
                idx,
                chunk.chars().count()
            );
            let bytes = self.get(&url).await?.bytes().await?;
            audio.extend_from_slice(&bytes);
        }

        let path = format!(
            "{}/summary_{}.mp3",
            out_dir.trim_end_matches('/'),
            file_timestamp()
        );
        fs::write(&path, &audio).await?;
        info!(%path, bytes = audio.len(), chunks = chunks.len(), "Wrote narration");
        Ok(path)
    }
}

/// Attach a translation and narration to the English summary.
///
/// A failed translation leaves both optional fields empty; a failed
/// narration keeps the translation.
#[instrument(level = "info", skip_all, fields(%lang))]
pub async fn final_summary<N: Narrator>(
    text_summary: String,
    narrator: &N,
    lang: &str,
    out_dir: &str,
) -> FinalSummary {
    let t0 = Instant::now();
    let translated = match narrator.translate(&text_summary, lang).await {
        Ok(translated) => translated,
        Err(e) => {
            warn!(error = %e, "Translation failed; returning text summary only");
            return FinalSummary::text_only(text_summary);
        }
    };

    let narration = match narrator.narrate(&translated, lang, out_dir).await {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(error = %e, "Narration failed; keeping translation");
            None
        }
    };

    info!(
        elapsed_ms = t0.elapsed().as_millis() as u64,
        narrated = narration.is_some(),
        "Final summary ready"
    );
    FinalSummary {
        text_summary,
        translated_summary: Some(translated),
        narration,
    }
}
