use condense_core::SummaryLimits;

use crate::CapabilityError;

/// Length bounds for one summarization call, in model tokens.
///
/// Generation is always greedy: the same text and params must give the same
/// summary, so no sampling switch exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryParams {
    pub max_length: u32,
    pub min_length: u32,
}

impl From<&SummaryLimits> for SummaryParams {
    fn from(limits: &SummaryLimits) -> Self {
        Self {
            max_length: limits.summary_length,
            min_length: limits.min_summary_length,
        }
    }
}

/// Single-pass summarization capability: maps one text that fits the model
/// window to a shorter text.
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, params: SummaryParams)
        -> Result<String, CapabilityError>;

    /// Short label for logs and health output.
    fn name(&self) -> &str;
}
