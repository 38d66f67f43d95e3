use std::sync::Arc;
use std::time::Duration;

use condense_engine::{
    CapabilityError, CharEstimateTokenCounter, HttpSummarizer, HttpSummarizerSettings,
    LeadSummarizer, Orchestrator, Summarizer, TokenCounter, WhitespaceTokenCounter,
};
use condense_logging::condense_info;

use crate::config::{AppConfig, BackendConfig, TokenizerConfig};

/// Wires the configured capabilities into one orchestrator. Runs once at startup.
pub fn build_orchestrator(config: &AppConfig) -> Result<Orchestrator, CapabilityError> {
    let summarizer = build_summarizer(&config.backend)?;
    let tokens = build_token_counter(config.tokenizer);
    condense_info!(
        "Summarizer backend={} tokenizer={:?} limits={:?}",
        summarizer.name(),
        config.tokenizer,
        config.limits
    );
    Ok(Orchestrator::new(
        summarizer,
        tokens,
        config.orchestrator_settings(),
    ))
}

fn build_summarizer(backend: &BackendConfig) -> Result<Arc<dyn Summarizer>, CapabilityError> {
    match backend {
        BackendConfig::Http {
            endpoint,
            connect_timeout_secs,
            request_timeout_secs,
            api_token,
        } => {
            let settings = HttpSummarizerSettings {
                endpoint: endpoint.clone(),
                connect_timeout: Duration::from_secs(*connect_timeout_secs),
                request_timeout: Duration::from_secs(*request_timeout_secs),
                api_token: api_token.clone(),
            };
            let summarizer = HttpSummarizer::new(settings)?;
            condense_info!("Model endpoint {}", summarizer.endpoint());
            Ok(Arc::new(summarizer))
        }
        BackendConfig::Lead => Ok(Arc::new(LeadSummarizer)),
    }
}

fn build_token_counter(tokenizer: TokenizerConfig) -> Arc<dyn TokenCounter> {
    match tokenizer {
        TokenizerConfig::Whitespace => Arc::new(WhitespaceTokenCounter),
        TokenizerConfig::CharEstimate { chars_per_token } => {
            Arc::new(CharEstimateTokenCounter::new(chars_per_token))
        }
    }
}

/// Word, character and compression figures for a finished summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    pub input_words: usize,
    pub input_chars: usize,
    pub summary_words: usize,
    /// Summary words as a percentage of input words.
    pub ratio_percent: f64,
}

impl CompressionStats {
    pub fn measure(input: &str, summary: &str) -> Self {
        let input_words = input.split_whitespace().count();
        let summary_words = summary.split_whitespace().count();
        let ratio_percent = if input_words == 0 {
            0.0
        } else {
            summary_words as f64 / input_words as f64 * 100.0
        };
        Self {
            input_words,
            input_chars: input.chars().count(),
            summary_words,
            ratio_percent,
        }
    }
}
