//! Backend construction errors.

/// Errors raised while configuring or building a backend client.
///
/// Failures during `generate` are reported as
/// [`tripbench_core::GenerationError`] instead.
#[derive(Debug, thiserror::Error)]
pub enum ModelsError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("missing API key for {0}")]
    MissingApiKey(&'static str),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result type for backend construction.
pub type Result<T> = std::result::Result<T, ModelsError>;
