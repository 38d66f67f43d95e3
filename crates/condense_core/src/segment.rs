use condense_logging::condense_debug;

use crate::sentences::split_sentences;
use crate::TokenCounter;

/// A contiguous run of sentences sized for one summarization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub sentences: Vec<String>,
    /// Sum of the independent token counts of `sentences`.
    pub token_count: u32,
}

impl Chunk {
    /// Chunk text as sent to the summarizer: sentences joined by single spaces.
    pub fn text(&self) -> String {
        self.sentences.join(" ")
    }

    pub fn exceeds(&self, max_length: u32) -> bool {
        self.token_count > max_length
    }
}

/// Splits `text` into sentences and groups them into chunks of at most
/// `max_length` tokens, repeating the last `overlap_sentences` sentences of
/// each closed chunk at the start of the next one.
///
/// Empty input yields no chunks. A sentence that alone exceeds `max_length`
/// is never truncated: it ends up in a chunk whose `token_count` is above the
/// limit. Overlap seeding is not trimmed either, so a seeded chunk can also
/// start above the limit when the carried sentences are long.
pub fn segment(
    text: &str,
    tokens: &dyn TokenCounter,
    max_length: u32,
    overlap_sentences: usize,
) -> Vec<Chunk> {
    let sentences = split_sentences(text);
    segment_sentences(sentences, tokens, max_length, overlap_sentences)
}

/// Greedy accumulation over already split sentences.
pub fn segment_sentences(
    sentences: Vec<String>,
    tokens: &dyn TokenCounter,
    max_length: u32,
    overlap_sentences: usize,
) -> Vec<Chunk> {
    let sentence_count = sentences.len();
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_length: u32 = 0;

    for sentence in sentences {
        let sentence_length = tokens.count(&sentence);

        if current_length.saturating_add(sentence_length) <= max_length || current.is_empty() {
            current_length = current_length.saturating_add(sentence_length);
            current.push(sentence);
            continue;
        }

        let seed = overlap_tail(&current, overlap_sentences);
        chunks.push(Chunk {
            sentences: std::mem::replace(&mut current, seed),
            token_count: current_length,
        });
        current.push(sentence);
        current_length = current
            .iter()
            .fold(0u32, |total, s| total.saturating_add(tokens.count(s)));
    }

    if !current.is_empty() {
        chunks.push(Chunk {
            sentences: current,
            token_count: current_length,
        });
    }

    condense_debug!(
        "Segmented {} sentences into {} chunks (max_length={}, overlap={})",
        sentence_count,
        chunks.len(),
        max_length,
        overlap_sentences
    );

    chunks
}

fn overlap_tail(sentences: &[String], overlap_sentences: usize) -> Vec<String> {
    if overlap_sentences == 0 {
        return Vec::new();
    }
    let start = sentences.len().saturating_sub(overlap_sentences);
    sentences[start..].to_vec()
}
