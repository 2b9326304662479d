use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;

use tripbench_core::model::fakes::CatalogEchoModel;
use tripbench_core::{
    AgentRegistry, GenerationError, GenerationOptions, ModelAdapter, Orchestrator, Scenario,
    FLIGHT_ROLE, HOTEL_ROLE, PLANNER_ROLE,
};
use tripbench_models::{
    AnthropicClient, AnthropicConfig, OpenAiCompatClient, OpenAiCompatConfig, WebSearchTool,
};

fn openai_client(server: &MockServer, key: Option<&str>) -> OpenAiCompatClient {
    let mut config = OpenAiCompatConfig::new(format!("{}/v1", server.base_url()), "qwen2.5-7b");
    config.request_timeout_ms = 5_000;
    if let Some(key) = key {
        config = config.with_api_key(key);
    }
    OpenAiCompatClient::new(config).expect("client should build")
}

#[tokio::test]
async fn openai_compat_sends_prompt_and_returns_content() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer local-key")
            .json_body_includes(
                json!({
                    "model": "qwen2.5-7b",
                    "messages": [{"role": "user", "content": "plan my trip"}],
                    "max_tokens": 64,
                    "temperature": 0.0
                })
                .to_string(),
            );
        then.status(200).json_body(json!({
            "choices": [{"message": {"role": "assistant", "content": "[TASK] PlannerAgent | {}"}}]
        }));
    });

    let client = openai_client(&server, Some("local-key"));
    let out = client
        .generate("plan my trip", &GenerationOptions::greedy().with_max_new_tokens(64))
        .await
        .expect("generation should succeed");

    mock.assert();
    assert_eq!(out, "[TASK] PlannerAgent | {}");
}

#[tokio::test]
async fn openai_compat_without_key_sends_no_auth_header() {
    let server = MockServer::start();
    let with_auth = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header_exists("authorization");
        then.status(500);
    });
    let without_auth = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200)
            .json_body(json!({"choices": [{"message": {"content": "ok"}}]}));
    });

    let out = openai_client(&server, None)
        .generate("hi", &GenerationOptions::default())
        .await
        .unwrap();

    assert_eq!(out, "ok");
    with_auth.assert_calls(0);
    without_auth.assert_calls(1);
}

#[tokio::test]
async fn openai_compat_maps_http_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(503).body("model loading");
    });

    let err = openai_client(&server, None)
        .generate("hi", &GenerationOptions::default())
        .await
        .unwrap_err();

    match err {
        GenerationError::Http { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "model loading");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn openai_compat_rejects_non_json_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).body("<html>proxy error</html>");
    });

    let err = openai_client(&server, None)
        .generate("hi", &GenerationOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}

#[tokio::test]
async fn anthropic_sends_headers_and_search_tool() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/messages")
            .header("x-api-key", "test-anthropic-key")
            .header("anthropic-version", "2023-06-01")
            .json_body_includes(
                json!({
                    "model": "claude-test",
                    "max_tokens": 800,
                    "tools": [{"type": "web_search_20250305", "name": "web_search", "max_uses": 1}]
                })
                .to_string(),
            );
        then.status(200).json_body(json!({
            "content": [
                {"type": "server_tool_use", "id": "srv_1", "name": "web_search", "input": {"query": "tokyo"}},
                {"type": "text", "text": "{\"city\":\"Tokyo\","},
                {"type": "text", "text": "\"days\":[]}"}
            ]
        }));
    });

    let config = AnthropicConfig::new("test-anthropic-key", "claude-test")
        .with_api_base(format!("{}/v1", server.base_url()))
        .with_web_search(WebSearchTool::default());
    let client = AnthropicClient::new(config).unwrap();

    let out = client
        .generate("plan tokyo", &GenerationOptions::default().with_max_new_tokens(800))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(out, "{\"city\":\"Tokyo\",\"days\":[]}");
}

#[tokio::test]
async fn anthropic_maps_http_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/messages");
        then.status(401)
            .json_body(json!({"type": "error", "error": {"type": "authentication_error"}}));
    });

    let client = AnthropicClient::new(
        AnthropicConfig::new("bad-key", "claude-test")
            .with_api_base(format!("{}/v1", server.base_url())),
    )
    .unwrap();

    let err = client
        .generate("hi", &GenerationOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Http { status: 401, .. }));
}

#[tokio::test]
async fn orchestrator_runs_over_http_backend() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({
            "choices": [{"message": {"content":
                "[TASK] FlightAgent | {\"origin\":\"Paris\",\"dest\":\"Tokyo\"}\n\
                 [TASK] HotelAgent | {\"city\":\"Tokyo\",\"nights\":2}\n\
                 [TASK] PlannerAgent | {\"city\":\"Tokyo\",\"days\":2}"}}]
        }));
    });

    let dir = tempfile::tempdir().unwrap();
    let registry = AgentRegistry::standard(
        Arc::new(CatalogEchoModel),
        dir.path().join("flights.jsonl"),
        dir.path().join("hotels.jsonl"),
    );
    let orch = Orchestrator::new(Arc::new(openai_client(&server, None)), registry);
    let scenario = Scenario::new(
        vec!["Paris".into(), "Tokyo".into()],
        vec![false, true],
        vec![1, 2],
    )
    .unwrap();

    let bundle = orch.invoke(&scenario).await.unwrap();
    assert_eq!(bundle.dispatch_order, vec![FLIGHT_ROLE, HOTEL_ROLE, PLANNER_ROLE]);
    assert_eq!(bundle.results_for(HOTEL_ROLE)[0]["nights"], 2);
    assert_eq!(bundle.results_for(FLIGHT_ROLE)[0]["price"], 0);
}
