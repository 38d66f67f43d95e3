//! Condense service: configuration, logging and the HTTP front end around
//! the summarization engine.
pub mod api;
pub mod config;
pub mod logging;
pub mod server;
pub mod service;

pub use api::{AppState, ApiError, SummarizeRequest, SummarizeResponse};
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_FILENAME};
pub use server::{build_router, serve, spawn};
pub use service::{build_orchestrator, CompressionStats};
