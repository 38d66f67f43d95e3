//! Condense engine: recursive long-document summarization over an injected
//! summarization capability.
mod lead;
mod orchestrator;
mod remote;
mod summarizer;
mod token;
mod types;

pub use condense_core::{SummaryLimits, TokenCounter};
pub use lead::LeadSummarizer;
pub use orchestrator::{
    DocumentSummary, Orchestrator, OrchestratorSettings, RoundReport, DEFAULT_MAX_ROUNDS,
};
pub use remote::{HttpSummarizer, HttpSummarizerSettings};
pub use summarizer::{SummaryParams, Summarizer};
pub use token::{CharEstimateTokenCounter, WhitespaceTokenCounter};
pub use types::{CapabilityError, CapabilityFailure, SummarizeError};
