use std::fmt;

/// Failure reported by the summarization capability itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe_failure(.kind, .message))]
pub struct CapabilityError {
    pub kind: CapabilityFailure,
    pub message: String,
}

impl CapabilityError {
    pub fn new(kind: CapabilityFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn describe_failure(kind: &CapabilityFailure, message: &str) -> String {
    if message.is_empty() {
        kind.to_string()
    } else {
        format!("{kind}: {message}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityFailure {
    /// The model could not be reached or is not loaded.
    Unavailable,
    HttpStatus(u16),
    Timeout,
    /// The model answered with something that is not a summary.
    InvalidResponse,
    /// The model refused the input (too long, malformed, out of resources).
    Rejected,
}

impl fmt::Display for CapabilityFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityFailure::Unavailable => write!(f, "summarizer unavailable"),
            CapabilityFailure::HttpStatus(code) => write!(f, "summarizer http status {code}"),
            CapabilityFailure::Timeout => write!(f, "summarizer timeout"),
            CapabilityFailure::InvalidResponse => write!(f, "invalid summarizer response"),
            CapabilityFailure::Rejected => write!(f, "summarizer rejected input"),
        }
    }
}

/// Why a document could not be summarized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummarizeError {
    #[error("could not segment a document of {input_tokens} tokens into chunks")]
    SegmentationFailed { input_tokens: u32 },
    #[error("{}", capability_message(.chunk, .source))]
    SummarizationCapabilityFailed {
        /// Index of the failing chunk; `None` for a single-pass document.
        chunk: Option<usize>,
        #[source]
        source: CapabilityError,
    },
    #[error(
        "summary still has {last_tokens} tokens (limit {max_tokens}) after {rounds} rounds"
    )]
    ConvergenceFailed {
        rounds: usize,
        last_tokens: u32,
        max_tokens: u32,
    },
}

impl SummarizeError {
    /// Stable label for the error kind, used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            SummarizeError::SegmentationFailed { .. } => "segmentation_failed",
            SummarizeError::SummarizationCapabilityFailed { .. } => {
                "summarization_capability_failed"
            }
            SummarizeError::ConvergenceFailed { .. } => "convergence_failed",
        }
    }
}

fn capability_message(chunk: &Option<usize>, source: &CapabilityError) -> String {
    match chunk {
        Some(idx) => format!("summarization failed for chunk {idx}: {source}"),
        None => format!("summarization failed: {source}"),
    }
}
