use crate::{CapabilityError, CapabilityFailure, SummaryParams, Summarizer};

/// Offline extractive stand-in for a model: keeps the first
/// `params.max_length` whitespace tokens of the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeadSummarizer;

#[async_trait::async_trait]
impl Summarizer for LeadSummarizer {
    async fn summarize(
        &self,
        text: &str,
        params: SummaryParams,
    ) -> Result<String, CapabilityError> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Err(CapabilityError::new(
                CapabilityFailure::Rejected,
                "empty input",
            ));
        }
        let keep = (params.max_length as usize).min(words.len());
        Ok(words[..keep].join(" "))
    }

    fn name(&self) -> &str {
        "lead"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: SummaryParams = SummaryParams {
        max_length: 3,
        min_length: 1,
    };

    #[tokio::test]
    async fn keeps_leading_words() {
        let summary = LeadSummarizer
            .summarize("one  two\nthree four five", PARAMS)
            .await
            .unwrap();
        assert_eq!(summary, "one two three");
    }

    #[tokio::test]
    async fn short_input_is_returned_whole() {
        let summary = LeadSummarizer.summarize("just two", PARAMS).await.unwrap();
        assert_eq!(summary, "just two");
    }

    #[tokio::test]
    async fn blank_input_is_rejected() {
        let err = LeadSummarizer.summarize("  \n", PARAMS).await.unwrap_err();
        assert_eq!(err.kind, CapabilityFailure::Rejected);
    }
}
