//! OpenAI-compatible chat completions backend.
//!
//! Covers hosted OpenAI-style APIs and local servers (Ollama, vLLM,
//! llama.cpp) that expose `/chat/completions`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};
use tracing::debug;

use tripbench_core::{GenerationError, GenerationOptions, GenerationResult, ModelAdapter};

use crate::error::{ModelsError, Result};
use crate::http::{build_client, endpoint, non_empty_env_var, post_json, timeout_from_env};

/// Default base URL: a local Ollama server.
pub const DEFAULT_OPENAI_BASE: &str = "http://localhost:11434/v1";

/// Connection settings for an OpenAI-compatible server.
#[derive(Debug, Clone)]
pub struct OpenAiCompatConfig {
    pub api_base: String,
    /// Optional: local servers usually accept unauthenticated requests.
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout_ms: u64,
}

impl OpenAiCompatConfig {
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: None,
            model: model.into(),
            request_timeout_ms: timeout_from_env(),
        }
    }

    /// Read `TRIPBENCH_OPENAI_BASE`, `TRIPBENCH_OPENAI_API_KEY`,
    /// `TRIPBENCH_OPENAI_MODEL` and `TRIPBENCH_REQUEST_TIMEOUT_MS`.
    ///
    /// The model id is required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let model = non_empty_env_var("TRIPBENCH_OPENAI_MODEL")
            .ok_or(ModelsError::MissingEnv("TRIPBENCH_OPENAI_MODEL"))?;
        Ok(Self {
            api_base: non_empty_env_var("TRIPBENCH_OPENAI_BASE")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE.to_string()),
            api_key: non_empty_env_var("TRIPBENCH_OPENAI_API_KEY"),
            model,
            request_timeout_ms: timeout_from_env(),
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// [`ModelAdapter`] over `POST {api_base}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    client: reqwest::Client,
    config: OpenAiCompatConfig,
}

impl OpenAiCompatClient {
    pub fn new(config: OpenAiCompatConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = config.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {key}"))
                    .map_err(|e| ModelsError::InvalidHeader(e.to_string()))?,
            );
        }

        let client = build_client(headers, config.request_timeout_ms)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenAiCompatConfig {
        &self.config
    }

    fn chat_completions_url(&self) -> String {
        endpoint(&self.config.api_base, "/chat/completions")
    }

    fn request_body(&self, prompt: &str, options: &GenerationOptions) -> Value {
        json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": options.max_new_tokens,
            "temperature": options.effective_temperature(),
            "stream": false,
        })
    }
}

/// Text of the first choice; an absent or null `content` reads as empty.
fn parse_chat_response(body: &Value) -> GenerationResult<String> {
    let choice = body
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| GenerationError::InvalidResponse("response has no choices".to_string()))?;

    Ok(choice
        .pointer("/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

#[async_trait]
impl ModelAdapter for OpenAiCompatClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> GenerationResult<String> {
        let url = self.chat_completions_url();
        debug!(url = %url, model = %self.config.model, prompt_bytes = prompt.len(), "chat completion request");
        let body = post_json(&self.client, &url, &self.request_body(prompt, options)).await?;
        parse_chat_response(&body)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}
