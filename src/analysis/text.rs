//! Extractive summaries and frequency keywords.

use crate::config::Lexicon;
use crate::utils::char_prefix;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Longest two-sentence summary kept verbatim.
const SUMMARY_MAX_CHARS: usize = 200;
/// Number of keywords kept per article.
pub const MAX_KEYWORDS: usize = 5;
/// Tokens of this length or shorter are never keywords.
const MIN_KEYWORD_LEN: usize = 3;

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence regex is valid"));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("word regex is valid"));

/// Split after every `.`, `!` or `?` that is followed by whitespace.
/// The punctuation stays with its sentence; the whitespace is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END.find_iter(text) {
        // the terminator is a single ASCII byte
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&text[start..]);
    sentences
}

/// Summarize article text.
///
/// The first two sentences are returned when together they fit in 200
/// characters, otherwise the first sentence alone. Text without a sentence
/// break is cut to 200 characters and marked with `...`.
pub fn summarize(text: &str) -> String {
    let sentences = split_sentences(text);
    if sentences.len() >= 2 {
        let lead = sentences[..2].join(" ");
        if lead.chars().count() <= SUMMARY_MAX_CHARS {
            lead.trim().to_string()
        } else {
            sentences[0].trim().to_string()
        }
    } else {
        format!("{}...", char_prefix(text, SUMMARY_MAX_CHARS).trim())
    }
}

/// The `n` most frequent items, ties broken by first occurrence.
pub fn most_common<'a, I>(items: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, item) in items.into_iter().enumerate() {
        counts.entry(item).or_insert((0, position)).0 += 1;
    }
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });
    ranked
        .into_iter()
        .take(n)
        .map(|(item, _)| item.to_string())
        .collect()
}

/// Up to five keywords, most frequent first.
///
/// Tokens are lower-cased word runs; stop words and tokens of three
/// characters or fewer are dropped.
pub fn extract_keywords(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let lower = text.to_lowercase();
    let words = WORD
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|word| !lexicon.is_stop_word(word) && word.chars().count() > MIN_KEYWORD_LEN);
    most_common(words, MAX_KEYWORDS)
}
