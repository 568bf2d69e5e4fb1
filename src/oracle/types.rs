//! Naming oracle configuration and batch types.

use serde::{Deserialize, Serialize};

use crate::core::errors::{RelumeError, Result};

/// Default Gemini endpoint; the model segment is appended per request.
pub const DEFAULT_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model for name suggestions.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for the naming oracle.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// API key for the text-generation service.
    pub api_key: String,
    /// Base endpoint URL.
    pub api_endpoint: String,
    /// Model identifier.
    pub model: String,
    /// Per-batch request timeout in seconds; a timed-out batch fails alone.
    pub request_timeout_secs: u64,
    /// Maximum batches in flight at once (1 = fully sequential).
    pub max_concurrency: usize,
    /// Character budget for the source excerpt included in each prompt.
    pub context_chars: usize,
}

/// Factory and builder methods for [`OracleConfig`].
impl OracleConfig {
    /// Create configuration from environment variables (`GEMINI_API_KEY`).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            RelumeError::config("GEMINI_API_KEY environment variable not set".to_string())
        })?;

        Ok(Self::with_api_key(api_key))
    }

    /// Create configuration with defaults around an explicit key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 30,
            max_concurrency: 1,
            context_chars: 4000,
        }
    }

    /// Sets the model used for suggestions.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the endpoint the oracle talks to.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    /// Sets the per-batch request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Sets the batch concurrency limit; clamped to at least 1.
    pub fn with_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    /// Sets the prompt source-excerpt budget in characters.
    pub fn with_context_budget(mut self, chars: usize) -> Self {
        self.context_chars = chars;
        self
    }
}

/// Batch sizing profile for assisted passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Throughput {
    /// Small batches: more per-variable attention from the service.
    Normal,
    /// Much larger batches: fewer requests, faster overall.
    Fast,
}

impl Throughput {
    /// Identifiers submitted per request.
    pub fn batch_size(self) -> usize {
        match self {
            Self::Normal => 8,
            Self::Fast => 40,
        }
    }
}

impl std::fmt::Display for Throughput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Fast => write!(f, "fast"),
        }
    }
}

/// Dry-run view of how a variable list would be partitioned.
#[derive(Debug, Clone, Serialize)]
pub struct BatchPlan {
    /// Profile the plan was computed for.
    pub throughput: Throughput,
    /// Identifiers per batch under that profile.
    pub batch_size: usize,
    /// Total variables across all batches.
    pub total_variables: usize,
    /// Member identifiers of each batch, in dispatch order.
    pub batches: Vec<Vec<String>>,
}
