//! Condense core: sentence splitting and token-bounded segmentation.
//!
//! Everything here is pure and synchronous. Token lengths come from an
//! injected [`TokenCounter`]; this crate never tokenizes on its own.
mod limits;
mod segment;
mod sentences;
mod token;

pub use limits::{
    SummaryLimits, MAX_MODEL_LENGTH, MIN_SUMMARY_LENGTH, OVERLAP_SIZE, SUMMARY_LENGTH,
};
pub use segment::{segment, segment_sentences, Chunk};
pub use sentences::split_sentences;
pub use token::TokenCounter;
