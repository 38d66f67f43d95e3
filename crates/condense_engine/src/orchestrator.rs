//! Recursive decomposition of documents that do not fit the model window.
//!
//! A document that fits is summarized in one call. Otherwise it is segmented,
//! every chunk is summarized, the summaries are joined with single spaces and
//! the joined text is treated as the next document. Each decomposition pass
//! is a round; after `max_rounds` rounds that still overflow the window the
//! orchestrator gives up with [`SummarizeError::ConvergenceFailed`].

use std::sync::Arc;

use condense_core::{segment, Chunk, SummaryLimits, TokenCounter};
use condense_logging::{condense_debug, condense_info, condense_warn};
use futures_util::future::BoxFuture;
use futures_util::{stream, StreamExt, TryStreamExt};

use crate::{SummarizeError, SummaryParams, Summarizer};

pub const DEFAULT_MAX_ROUNDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorSettings {
    pub limits: SummaryLimits,
    /// Decomposition passes allowed before giving up.
    pub max_rounds: usize,
    /// Chunk summaries allowed in flight at once; 1 is strictly sequential.
    pub chunk_concurrency: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            limits: SummaryLimits::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            chunk_concurrency: 1,
        }
    }
}

/// Statistics for one decomposition pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub input_tokens: u32,
    pub chunks: usize,
    pub output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub summary: String,
    pub input_tokens: u32,
    /// Empty when the document fit in a single pass.
    pub rounds: Vec<RoundReport>,
}

pub struct Orchestrator {
    summarizer: Arc<dyn Summarizer>,
    tokens: Arc<dyn TokenCounter>,
    settings: OrchestratorSettings,
}

impl Orchestrator {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        tokens: Arc<dyn TokenCounter>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            summarizer,
            tokens,
            settings,
        }
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    pub fn summarizer_name(&self) -> &str {
        self.summarizer.name()
    }

    /// Summarizes `text`, decomposing it as often as needed to fit the window.
    pub async fn summarize_document(&self, text: &str) -> Result<DocumentSummary, SummarizeError> {
        let limits = &self.settings.limits;
        let max_tokens = limits.max_model_length;
        let input_tokens = self.tokens.count(text);

        if input_tokens <= max_tokens {
            condense_debug!("Single-pass summary for {} tokens", input_tokens);
            let summary = self
                .summarize_one(text)
                .await
                .map_err(|source| SummarizeError::SummarizationCapabilityFailed {
                    chunk: None,
                    source,
                })?;
            return Ok(DocumentSummary {
                summary,
                input_tokens,
                rounds: Vec::new(),
            });
        }

        let mut current = text.to_string();
        let mut current_tokens = input_tokens;
        let mut rounds: Vec<RoundReport> = Vec::new();

        while rounds.len() < self.settings.max_rounds {
            let chunks = segment(
                &current,
                self.tokens.as_ref(),
                max_tokens,
                limits.overlap_size,
            );
            if chunks.is_empty() {
                return Err(SummarizeError::SegmentationFailed {
                    input_tokens: current_tokens,
                });
            }
            let oversized = chunks.iter().filter(|c| c.exceeds(max_tokens)).count();
            if oversized > 0 {
                condense_warn!(
                    "{} of {} chunks exceed {} tokens; the summarizer sees them whole",
                    oversized,
                    chunks.len(),
                    max_tokens
                );
            }

            let summaries = self.summarize_chunks(&chunks).await?;
            let combined = summaries.join(" ");
            let combined_tokens = self.tokens.count(&combined);

            rounds.push(RoundReport {
                input_tokens: current_tokens,
                chunks: chunks.len(),
                output_tokens: combined_tokens,
            });
            condense_info!(
                "Round {}: {} tokens -> {} chunks -> {} tokens",
                rounds.len(),
                current_tokens,
                chunks.len(),
                combined_tokens
            );

            if combined_tokens <= max_tokens {
                return Ok(DocumentSummary {
                    summary: combined,
                    input_tokens,
                    rounds,
                });
            }

            current = combined;
            current_tokens = combined_tokens;
        }

        condense_warn!(
            "Summary did not converge after {} rounds ({} tokens left)",
            rounds.len(),
            current_tokens
        );
        Err(SummarizeError::ConvergenceFailed {
            rounds: rounds.len(),
            last_tokens: current_tokens,
            max_tokens,
        })
    }

    /// Summarizes chunks in order. Up to `chunk_concurrency` calls run at once
    /// but results are collected by chunk index; the first failure wins.
    ///
    /// Boxed so the future is `Send` at concrete lifetimes; rustc cannot prove
    /// the higher-ranked `Send` bound axum needs for the unboxed stream future.
    fn summarize_chunks<'a>(
        &'a self,
        chunks: &'a [Chunk],
    ) -> BoxFuture<'a, Result<Vec<String>, SummarizeError>> {
        let concurrency = self.settings.chunk_concurrency.max(1);
        Box::pin(stream::iter(chunks.iter().enumerate())
            .map(move |(idx, chunk)| async move {
                let text = chunk.text();
                condense_debug!(
                    "Summarizing chunk {} ({} sentences, {} tokens)",
                    idx,
                    chunk.sentences.len(),
                    chunk.token_count
                );
                self.summarize_one(&text).await.map_err(|source| {
                    SummarizeError::SummarizationCapabilityFailed {
                        chunk: Some(idx),
                        source,
                    }
                })
            })
            .buffered(concurrency)
            .try_collect())
    }

    async fn summarize_one(&self, text: &str) -> Result<String, crate::CapabilityError> {
        let params = SummaryParams::from(&self.settings.limits);
        self.summarizer.summarize(text, params).await
    }
}
