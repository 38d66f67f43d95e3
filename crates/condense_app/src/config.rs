//! Service configuration, read once at startup from a RON file.
//!
//! Every section has defaults, so a missing file or a partial file is fine.
//! A file that exists but does not parse, or values that fail validation,
//! stop startup with every problem listed.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use condense_engine::{OrchestratorSettings, SummaryLimits, DEFAULT_MAX_ROUNDS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILENAME: &str = "condense.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub limits: SummaryLimits,
    pub orchestrator: OrchestratorConfig,
    pub backend: BackendConfig,
    pub tokenizer: TokenizerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Upper bound for one whole summarization request.
    pub request_timeout_secs: u64,
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            request_timeout_secs: 600,
            cors: true,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub max_rounds: usize,
    pub chunk_concurrency: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            chunk_concurrency: 1,
        }
    }
}

/// Which summarization capability backs the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendConfig {
    /// Remote inference server.
    Http {
        endpoint: String,
        #[serde(default = "default_connect_timeout_secs")]
        connect_timeout_secs: u64,
        #[serde(default = "default_backend_timeout_secs")]
        request_timeout_secs: u64,
        #[serde(default)]
        api_token: Option<String>,
    },
    /// Offline extractive stand-in; no model required.
    Lead,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_backend_timeout_secs() -> u64 {
    180
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Http {
            endpoint: "http://127.0.0.1:8080/summarize".to_string(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_backend_timeout_secs(),
            api_token: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TokenizerConfig {
    #[default]
    Whitespace,
    CharEstimate { chars_per_token: u32 },
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogDestination {
    /// Write to the configured log file.
    File,
    /// Write to terminal (stdout).
    #[default]
    Terminal,
    /// Write to both file and terminal.
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub destination: LogDestination,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::Terminal,
            level: "info".to_string(),
            file: PathBuf::from("./condense.log"),
        }
    }
}

impl AppConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = ron::from_str(content).map_err(|err| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field and reports all problems together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = self.limits.problems();

        if self.server.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            problems.push(format!(
                "server.bind_addr {:?} is not a socket address",
                self.server.bind_addr
            ));
        }
        if self.server.request_timeout_secs == 0 {
            problems.push("server.request_timeout_secs must be positive".to_string());
        }
        if self.orchestrator.max_rounds == 0 {
            problems.push("orchestrator.max_rounds must be at least 1".to_string());
        }
        if self.orchestrator.chunk_concurrency == 0 {
            problems.push("orchestrator.chunk_concurrency must be at least 1".to_string());
        }
        if let BackendConfig::Http { endpoint, .. } = &self.backend {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                problems.push(format!("backend endpoint {endpoint:?} must be an http(s) URL"));
            }
        }
        if let TokenizerConfig::CharEstimate { chars_per_token: 0 } = self.tokenizer {
            problems.push("tokenizer chars_per_token must be positive".to_string());
        }
        if condense_logging::parse_level(&self.logging.level).is_none() {
            problems.push(format!("logging.level {:?} is not a level", self.logging.level));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            limits: self.limits,
            max_rounds: self.orchestrator.max_rounds,
            chunk_concurrency: self.orchestrator.chunk_concurrency,
        }
    }
}
