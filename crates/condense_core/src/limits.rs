use serde::{Deserialize, Serialize};

/// Maximum input tokens accepted by one summarization call.
pub const MAX_MODEL_LENGTH: u32 = 1024;
/// Target (maximum) summary length in tokens.
pub const SUMMARY_LENGTH: u32 = 150;
/// Minimum summary length in tokens.
pub const MIN_SUMMARY_LENGTH: u32 = 30;
/// Sentences carried from the tail of one chunk into the next.
pub const OVERLAP_SIZE: usize = 50;

/// Length limits fixed at startup and shared read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryLimits {
    pub max_model_length: u32,
    pub summary_length: u32,
    pub min_summary_length: u32,
    pub overlap_size: usize,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self {
            max_model_length: MAX_MODEL_LENGTH,
            summary_length: SUMMARY_LENGTH,
            min_summary_length: MIN_SUMMARY_LENGTH,
            overlap_size: OVERLAP_SIZE,
        }
    }
}

impl SummaryLimits {
    /// Returns every problem with these limits; empty when they are usable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.max_model_length == 0 {
            problems.push("max_model_length must be positive".to_string());
        }
        if self.summary_length == 0 {
            problems.push("summary_length must be positive".to_string());
        }
        if self.min_summary_length > self.summary_length {
            problems.push(format!(
                "min_summary_length ({}) must not exceed summary_length ({})",
                self.min_summary_length, self.summary_length
            ));
        }
        if self.summary_length >= self.max_model_length {
            // A summary that cannot be shorter than the model window never converges.
            problems.push(format!(
                "summary_length ({}) must be below max_model_length ({})",
                self.summary_length, self.max_model_length
            ));
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_service_constants() {
        let limits = SummaryLimits::default();
        assert_eq!(limits.max_model_length, 1024);
        assert_eq!(limits.summary_length, 150);
        assert_eq!(limits.min_summary_length, 30);
        assert_eq!(limits.overlap_size, 50);
        assert!(limits.problems().is_empty());
    }

    #[test]
    fn reports_all_problems_at_once() {
        let limits = SummaryLimits {
            max_model_length: 100,
            summary_length: 120,
            min_summary_length: 200,
            overlap_size: 0,
        };
        let problems = limits.problems();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("min_summary_length"));
        assert!(problems[1].contains("max_model_length"));
    }
}
