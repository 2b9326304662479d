//! Helpers shared by the HTTP backends.

use std::time::Duration;

use reqwest::header::HeaderMap;
use tripbench_core::{GenerationError, GenerationResult};

use crate::error::Result;

/// Timeout used when `TRIPBENCH_REQUEST_TIMEOUT_MS` is unset or invalid.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;

pub(crate) fn non_empty_env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub(crate) fn timeout_from_env() -> u64 {
    non_empty_env_var("TRIPBENCH_REQUEST_TIMEOUT_MS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
}

/// Append `suffix` to `base` unless it is already there.
pub(crate) fn endpoint(base: &str, suffix: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.ends_with(suffix) {
        return base.to_string();
    }
    format!("{base}{suffix}")
}

pub(crate) fn build_client(headers: HeaderMap, timeout_ms: u64) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_millis(timeout_ms.max(1)))
        .build()?)
}

/// POST `body` as JSON and return the decoded JSON response.
pub(crate) async fn post_json(
    client: &reqwest::Client,
    url: &str,
    body: &serde_json::Value,
) -> GenerationResult<serde_json::Value> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| GenerationError::Backend(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| GenerationError::Backend(e.to_string()))?;

    if !status.is_success() {
        return Err(GenerationError::Http {
            status: status.as_u16(),
            body: text,
        });
    }

    serde_json::from_str(&text).map_err(|e| GenerationError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_once() {
        assert_eq!(
            endpoint("http://localhost:11434/v1/", "/chat/completions"),
            "http://localhost:11434/v1/chat/completions"
        );
        assert_eq!(
            endpoint("http://h/v1/chat/completions", "/chat/completions"),
            "http://h/v1/chat/completions"
        );
    }
}
