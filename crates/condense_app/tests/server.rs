//! Integration tests for the HTTP API.
//!
//! Each test starts a real axum server on a random port and talks to it
//! with reqwest.

use std::sync::Arc;
use std::time::Duration;

use condense_app::{build_router, spawn, AppState, SummarizeResponse};
use condense_engine::{
    CapabilityError, CapabilityFailure, LeadSummarizer, Orchestrator, OrchestratorSettings,
    Summarizer, SummaryLimits, SummaryParams, WhitespaceTokenCounter,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

struct FailingSummarizer;

#[async_trait::async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _: &str, _: SummaryParams) -> Result<String, CapabilityError> {
        Err(CapabilityError::new(
            CapabilityFailure::HttpStatus(503),
            "model loading",
        ))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct StalledSummarizer;

#[async_trait::async_trait]
impl Summarizer for StalledSummarizer {
    async fn summarize(&self, text: &str, _: SummaryParams) -> Result<String, CapabilityError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "stalled"
    }
}

/// Repeats its input, so nothing ever shrinks.
struct EchoSummarizer;

#[async_trait::async_trait]
impl Summarizer for EchoSummarizer {
    async fn summarize(&self, text: &str, _: SummaryParams) -> Result<String, CapabilityError> {
        Ok(format!("{text} {text}"))
    }

    fn name(&self) -> &str {
        "echo"
    }
}

fn settings() -> OrchestratorSettings {
    OrchestratorSettings {
        limits: SummaryLimits {
            max_model_length: 10,
            summary_length: 3,
            min_summary_length: 1,
            overlap_size: 0,
        },
        max_rounds: 2,
        chunk_concurrency: 2,
    }
}

async fn spawn_with(summarizer: Arc<dyn Summarizer>, timeout: Duration) -> String {
    condense_logging::initialize_for_tests();
    let orchestrator = Orchestrator::new(summarizer, Arc::new(WhitespaceTokenCounter), settings());
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        request_timeout: timeout,
    };
    let addr = spawn(build_router(state, true), ([127, 0, 0, 1], 0).into())
        .await
        .expect("server binds");
    format!("http://{addr}")
}

async fn post_text(base: &str, text: &str) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}/summarize"))
        .json(&json!({ "text": text }))
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

fn long_document() -> String {
    (0..10)
        .map(|i| format!("s{i} s{i} s{i} s{i}."))
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::test]
async fn root_lists_endpoints() {
    let base = spawn_with(Arc::new(LeadSummarizer), Duration::from_secs(5)).await;
    let json: Value = reqwest::get(format!("{base}/")).await.unwrap().json().await.unwrap();
    assert_eq!(json["endpoints"]["summarize"]["path"], "/summarize");
    assert_eq!(json["endpoints"]["summarize"]["method"], "POST");
}

#[tokio::test]
async fn health_reports_backend() {
    let base = spawn_with(Arc::new(LeadSummarizer), Duration::from_secs(5)).await;
    let json: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["backend"], "lead");
    assert_eq!(json["max_model_length"], 10);
}

#[tokio::test]
async fn short_text_is_summarized_in_one_pass() {
    let base = spawn_with(Arc::new(LeadSummarizer), Duration::from_secs(5)).await;
    let (status, json) = post_text(&base, "alpha beta gamma delta.").await;

    assert_eq!(status, 200);
    let body: SummarizeResponse = serde_json::from_value(json).unwrap();
    assert_eq!(
        body,
        SummarizeResponse {
            summary: "alpha beta gamma".to_string(),
            input_tokens: 4,
            rounds: 0,
        }
    );
}

#[tokio::test]
async fn long_text_is_decomposed() {
    let base = spawn_with(Arc::new(LeadSummarizer), Duration::from_secs(5)).await;
    let (status, json) = post_text(&base, &long_document()).await;

    assert_eq!(status, 200);
    assert_eq!(json["summary"], "s0 s0 s0");
    assert_eq!(json["input_tokens"], 40);
    assert_eq!(json["rounds"], 2);
}

#[tokio::test]
async fn blank_text_is_rejected() {
    let base = spawn_with(Arc::new(LeadSummarizer), Duration::from_secs(5)).await;
    let (status, json) = post_text(&base, "   ").await;

    assert_eq!(status, 400);
    assert_eq!(json["error"]["kind"], "empty_text");
    assert!(json.get("summary").is_none());
}

#[tokio::test]
async fn malformed_body_gets_a_typed_error() {
    let base = spawn_with(Arc::new(LeadSummarizer), Duration::from_secs(5)).await;
    let client = reqwest::Client::new();

    for body in [r#"{"txt": "wrong field"}"#, "not json"] {
        let resp = client
            .post(format!("{base}/summarize"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 400);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["error"]["kind"], "invalid_request");
    }
}

#[tokio::test]
async fn capability_failure_is_a_typed_bad_gateway() {
    let base = spawn_with(Arc::new(FailingSummarizer), Duration::from_secs(5)).await;
    let (status, json) = post_text(&base, "Some text.").await;

    assert_eq!(status, 502);
    assert_eq!(json["error"]["kind"], "summarization_capability_failed");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("model loading"));
    assert!(json.get("summary").is_none());
}

#[tokio::test]
async fn non_convergence_is_reported() {
    let base = spawn_with(Arc::new(EchoSummarizer), Duration::from_secs(5)).await;
    let (status, json) = post_text(&base, &long_document()).await;

    assert_eq!(status, 422);
    assert_eq!(json["error"]["kind"], "convergence_failed");
}

#[tokio::test]
async fn slow_summarization_times_out() {
    let base = spawn_with(Arc::new(StalledSummarizer), Duration::from_millis(100)).await;
    let (status, json) = post_text(&base, "Some text.").await;

    assert_eq!(status, 504);
    assert_eq!(json["error"]["kind"], "timed_out");
}
