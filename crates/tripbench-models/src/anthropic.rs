//! Anthropic Messages backend, optionally with the server-side web-search tool.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};
use tracing::debug;

use tripbench_core::{GenerationError, GenerationOptions, GenerationResult, ModelAdapter};

use crate::error::{ModelsError, Result};
use crate::http::{build_client, endpoint, non_empty_env_var, post_json, timeout_from_env};

pub const DEFAULT_ANTHROPIC_BASE: &str = "https://api.anthropic.com/v1";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";

/// Server-side web search settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSearchTool {
    pub max_uses: u32,
    pub allowed_domains: Vec<String>,
    pub blocked_domains: Vec<String>,
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self {
            max_uses: 1,
            allowed_domains: Vec::new(),
            blocked_domains: Vec::new(),
        }
    }
}

impl WebSearchTool {
    fn to_value(&self) -> Value {
        let mut tool = json!({
            "type": WEB_SEARCH_TOOL_TYPE,
            "name": "web_search",
            "max_uses": self.max_uses,
        });
        if !self.allowed_domains.is_empty() {
            tool["allowed_domains"] = json!(self.allowed_domains);
        }
        if !self.blocked_domains.is_empty() {
            tool["blocked_domains"] = json!(self.blocked_domains);
        }
        tool
    }
}

#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub request_timeout_ms: u64,
    pub web_search: Option<WebSearchTool>,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_ANTHROPIC_BASE.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            request_timeout_ms: timeout_from_env(),
            web_search: None,
        }
    }

    /// Read `TRIPBENCH_ANTHROPIC_BASE`, `ANTHROPIC_API_KEY`,
    /// `TRIPBENCH_ANTHROPIC_MODEL` and `TRIPBENCH_REQUEST_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        let api_key = non_empty_env_var("ANTHROPIC_API_KEY")
            .ok_or(ModelsError::MissingEnv("ANTHROPIC_API_KEY"))?;
        let model = non_empty_env_var("TRIPBENCH_ANTHROPIC_MODEL")
            .ok_or(ModelsError::MissingEnv("TRIPBENCH_ANTHROPIC_MODEL"))?;
        Ok(Self {
            api_base: non_empty_env_var("TRIPBENCH_ANTHROPIC_BASE")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE.to_string()),
            api_key,
            model,
            request_timeout_ms: timeout_from_env(),
            web_search: None,
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_web_search(mut self, tool: WebSearchTool) -> Self {
        self.web_search = Some(tool);
        self
    }
}

/// [`ModelAdapter`] over `POST {api_base}/messages`.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ModelsError::MissingApiKey("anthropic"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(config.api_key.trim())
                .map_err(|e| ModelsError::InvalidHeader(e.to_string()))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));

        let client = build_client(headers, config.request_timeout_ms)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AnthropicConfig {
        &self.config
    }

    fn messages_url(&self) -> String {
        endpoint(&self.config.api_base, "/messages")
    }

    fn request_body(&self, prompt: &str, options: &GenerationOptions) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "max_tokens": options.max_new_tokens,
            "temperature": options.effective_temperature(),
            "messages": [{ "role": "user", "content": prompt }],
        });
        if let Some(tool) = &self.config.web_search {
            body["tools"] = json!([tool.to_value()]);
        }
        body
    }
}

/// Concatenate every `text` block; tool-use and search-result blocks are dropped.
fn parse_messages_response(body: &Value) -> GenerationResult<String> {
    let blocks = body
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| GenerationError::InvalidResponse("response has no content".to_string()))?;

    Ok(blocks
        .iter()
        .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|b| b.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join(""))
}

#[async_trait]
impl ModelAdapter for AnthropicClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> GenerationResult<String> {
        let url = self.messages_url();
        debug!(
            url = %url,
            model = %self.config.model,
            web_search = self.config.web_search.is_some(),
            "messages request"
        );
        let body = post_json(&self.client, &url, &self.request_body(prompt, options)).await?;
        parse_messages_response(&body)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_is_rejected() {
        let err = AnthropicClient::new(AnthropicConfig::new("  ", "m")).unwrap_err();
        assert!(matches!(err, ModelsError::MissingApiKey(_)));
    }

    #[test]
    fn test_request_body_includes_web_search_tool() {
        let config = AnthropicConfig::new("k", "claude-test").with_web_search(WebSearchTool {
            allowed_domains: vec!["example.org".to_string()],
            ..WebSearchTool::default()
        });
        let client = AnthropicClient::new(config).unwrap();
        let body = client.request_body("plan", &GenerationOptions::default().with_max_new_tokens(800));
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(
            body["tools"],
            json!([{
                "type": "web_search_20250305",
                "name": "web_search",
                "max_uses": 1,
                "allowed_domains": ["example.org"],
            }])
        );
    }

    #[test]
    fn test_request_body_without_tools() {
        let client = AnthropicClient::new(AnthropicConfig::new("k", "claude-test")).unwrap();
        let body = client.request_body("plan", &GenerationOptions::default());
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_parse_concatenates_text_blocks_only() {
        let body = json!({
            "content": [
                {"type": "text", "text": "{\"city\":"},
                {"type": "server_tool_use", "id": "t1", "name": "web_search"},
                {"type": "web_search_tool_result", "content": []},
                {"type": "text", "text": "\"Tokyo\"}"}
            ]
        });
        assert_eq!(parse_messages_response(&body).unwrap(), "{\"city\":\"Tokyo\"}");
    }
}
