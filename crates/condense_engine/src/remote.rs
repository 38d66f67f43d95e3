use std::time::Duration;

use condense_logging::condense_debug;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use crate::{CapabilityError, CapabilityFailure, SummaryParams, Summarizer};

#[derive(Debug, Clone)]
pub struct HttpSummarizerSettings {
    /// Full URL of the summarization route, e.g. `http://model:8080/summarize`.
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Sent as a bearer token when present.
    pub api_token: Option<String>,
}

impl Default for HttpSummarizerSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/summarize".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(180),
            api_token: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryText {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SummarizeResponse {
    Batch(Vec<SummaryText>),
    Single(SummaryText),
}

/// Summarizer backed by a text-summarization inference server.
///
/// Sends `{"inputs", "parameters": {"max_length", "min_length", "do_sample": false}}`
/// and expects `[{"summary_text": ...}]`.
#[derive(Debug, Clone)]
pub struct HttpSummarizer {
    client: reqwest::Client,
    settings: HttpSummarizerSettings,
}

impl HttpSummarizer {
    pub fn new(settings: HttpSummarizerSettings) -> Result<Self, CapabilityError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| CapabilityError::new(CapabilityFailure::Unavailable, err.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }
}

#[async_trait::async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(
        &self,
        text: &str,
        params: SummaryParams,
    ) -> Result<String, CapabilityError> {
        let body = SummarizeRequest {
            inputs: text,
            parameters: GenerationParameters {
                max_length: params.max_length,
                min_length: params.min_length,
                do_sample: false,
            },
        };

        let mut request = self
            .client
            .post(&self.settings.endpoint)
            .json(&body);
        if let Some(token) = self.settings.api_token.as_deref() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let kind = if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
                || status == reqwest::StatusCode::PAYLOAD_TOO_LARGE
            {
                CapabilityFailure::Rejected
            } else {
                CapabilityFailure::HttpStatus(status.as_u16())
            };
            return Err(CapabilityError::new(kind, detail.trim().to_string()));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let parsed: SummarizeResponse = serde_json::from_slice(&bytes).map_err(|err| {
            CapabilityError::new(CapabilityFailure::InvalidResponse, err.to_string())
        })?;

        let summary = match parsed {
            SummarizeResponse::Batch(items) => items.into_iter().next(),
            SummarizeResponse::Single(item) => Some(item),
        }
        .map(|item| item.summary_text)
        .ok_or_else(|| {
            CapabilityError::new(CapabilityFailure::InvalidResponse, "no summary in response")
        })?;

        condense_debug!(
            "Model returned {} chars for {} chars of input",
            summary.len(),
            text.len()
        );
        Ok(summary)
    }

    fn name(&self) -> &str {
        "http"
    }
}

fn map_reqwest_error(err: reqwest::Error) -> CapabilityError {
    if err.is_timeout() {
        return CapabilityError::new(CapabilityFailure::Timeout, err.to_string());
    }
    if err.is_decode() {
        return CapabilityError::new(CapabilityFailure::InvalidResponse, err.to_string());
    }
    CapabilityError::new(CapabilityFailure::Unavailable, err.to_string())
}
