//! Error types for the task protocol parser.

/// Errors produced while turning orchestrator text into task units.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Not a single line matched the task-line grammar.
    #[error("no tasks recognized in orchestrator output")]
    NoTasksRecognized,

    /// A line matched the grammar but its JSON payload did not decode.
    #[error("task line {line} ({role}): payload is not a valid JSON object: {source}")]
    TaskDecode {
        line: usize,
        role: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for protocol parsing.
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;
