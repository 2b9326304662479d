//! Error taxonomy for the orchestration core.

use crate::protocol::ProtocolError;

/// The Model Adapter failed to produce text.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("model backend error: {0}")]
    Backend(String),

    #[error("model backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    #[error("missing API key for model backend")]
    MissingApiKey,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Scenario invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    #[error("scenario must contain at least one city")]
    Empty,

    #[error("scenario arrays differ in length: cities={cities}, book_hotels={book_hotels}, plan_days={plan_days}")]
    LengthMismatch {
        cities: usize,
        book_hotels: usize,
        plan_days: usize,
    },

    #[error("adjacent cities must differ: {city} repeated at position {position}")]
    AdjacentDuplicate { city: String, position: usize },
}

/// Fatal errors that abort a single orchestrator invocation.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("orchestrator model failed: {0}")]
    Generation(#[from] GenerationError),

    /// The raw model text is kept so the caller can inspect what went wrong.
    #[error("orchestrator output rejected: {source}")]
    Protocol {
        #[source]
        source: ProtocolError,
        raw_output: String,
    },

    #[error("no agent registered for role '{role}' (task line {line})")]
    UnregisteredRole { role: String, line: usize },
}

impl OrchestratorError {
    /// Raw orchestrator text, when the failure happened after the model call.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            OrchestratorError::Protocol { raw_output, .. } => Some(raw_output),
            _ => None,
        }
    }
}

/// Failures reading or writing JSONL stores and logs.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
