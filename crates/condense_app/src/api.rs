//! HTTP endpoint handlers.
//!
//! Failures are always returned as `{"error": {"kind", "message"}}` with a
//! status code per kind, never as a summary field.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use condense_engine::{Orchestrator, SummarizeError};
use condense_logging::{condense_info, condense_warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummarizeResponse {
    pub summary: String,
    pub input_tokens: u32,
    /// Decomposition rounds; 0 when the text fit in one pass.
    pub rounds: usize,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidRequest(String),
    #[error("text must not be empty")]
    EmptyText,
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
    #[error("summarization did not finish within {0:?}")]
    TimedOut(Duration),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::EmptyText => "empty_text",
            ApiError::Summarize(err) => err.kind(),
            ApiError::TimedOut(_) => "timed_out",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::EmptyText => StatusCode::BAD_REQUEST,
            ApiError::Summarize(SummarizeError::SegmentationFailed { .. })
            | ApiError::Summarize(SummarizeError::ConvergenceFailed { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Summarize(SummarizeError::SummarizationCapabilityFailed { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::TimedOut(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            }
        });
        (self.status(), Json(body)).into_response()
    }
}

/// GET /: service description.
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Summarization API is running",
        "endpoints": {
            "summarize": {
                "method": "POST",
                "path": "/summarize",
                "description": "Generate text summary"
            },
            "health": {
                "method": "GET",
                "path": "/health",
                "description": "Liveness and backend name"
            }
        }
    }))
}

/// GET /health
pub async fn health(State(app): State<AppState>) -> Json<serde_json::Value> {
    let settings = app.orchestrator.settings();
    Json(json!({
        "status": "ok",
        "backend": app.orchestrator.summarizer_name(),
        "max_model_length": settings.limits.max_model_length,
        "max_rounds": settings.max_rounds,
    }))
}

/// POST /summarize: summarize one document of any length.
///
/// The whole request runs under `request_timeout`; when it fires the pending
/// chunk calls are dropped and no further rounds start.
pub async fn summarize(
    State(app): State<AppState>,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    if body.text.trim().is_empty() {
        return Err(ApiError::EmptyText);
    }

    let work = app.orchestrator.summarize_document(&body.text);
    let result = match tokio::time::timeout(app.request_timeout, work).await {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            condense_warn!("Summarization failed ({}): {}", err.kind(), err);
            return Err(err.into());
        }
        Err(_) => {
            condense_warn!("Summarization timed out after {:?}", app.request_timeout);
            return Err(ApiError::TimedOut(app.request_timeout));
        }
    };

    condense_info!(
        "Summarized {} tokens in {} rounds into {} chars",
        result.input_tokens,
        result.rounds.len(),
        result.summary.len()
    );
    Ok(Json(SummarizeResponse {
        summary: result.summary,
        input_tokens: result.input_tokens,
        rounds: result.rounds.len(),
    }))
}
