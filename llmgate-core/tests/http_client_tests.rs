//! End-to-end tests for the reqwest transport against mock vendors

mod common;

use common::{init_tracing, OPENAI_SUCCESS};
use llmgate_core::http::client::HttpClient;
use llmgate_core::http::{HttpTransport, RequestOptions};
use llmgate_core::providers::{ProviderError, ProviderKind, ProviderRegistry};
use llmgate_core::Gateway;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Gateway whose `kind` adapter points at the mock server
fn gateway_for(kind: ProviderKind, base_url: &str) -> Gateway {
    let mut registry = ProviderRegistry::new();
    registry
        .register(kind.id(), kind.create_adapter(Some(base_url)))
        .unwrap();
    Gateway::new(Arc::new(registry), Arc::new(HttpClient::new().unwrap()))
}

#[tokio::test]
async fn test_openai_success() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "model": "gpt-4o",
            "messages": [{"role": "user", "content": "hello"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(OPENAI_SUCCESS))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(ProviderKind::OpenAI, &mock_server.uri());
    let response = gateway
        .call("openai", "gpt-4o", "hello", "test-key", Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(response.answer_text, "Hi there");
}

#[tokio::test]
async fn test_gemini_key_travels_in_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-pro:generateContent"))
        .and(query_param("key", "g-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "Bonjour"}]}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(ProviderKind::Gemini, &mock_server.uri());
    let response = gateway
        .call("gemini", "gemini-pro", "hello", "g-key", Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(response.answer_text, "Bonjour");
}

#[tokio::test]
async fn test_anthropic_headers_and_upstream_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "bad"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(ProviderKind::Anthropic, &mock_server.uri());
    let err = gateway
        .call("anthropic", "claude-3-5-sonnet-20240620", "hello", "bad", Duration::from_secs(5))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ProviderError::Upstream {
            status: 401,
            message: "invalid x-api-key".to_string()
        }
    );
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/aigc/text-generation/generation"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(ProviderKind::Qwen, &mock_server.uri());
    let err = gateway
        .call("qwen", "qwen-turbo", "hello", "k1", Duration::from_secs(5))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ProviderError::Upstream {
            status: 503,
            message: "upstream overloaded".to_string()
        }
    );
}

#[tokio::test]
async fn test_deadline_is_transport_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(OPENAI_SUCCESS)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(ProviderKind::Groq, &mock_server.uri());
    let err = gateway
        .call("groq", "mixtral-8x7b-32768", "hello", "k1", Duration::from_millis(100))
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Reserve a port, then free it so nothing is listening
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let gateway = gateway_for(ProviderKind::DeepSeek, &format!("http://127.0.0.1:{}", port));
    let err = gateway
        .call("deepseek", "deepseek-chat", "hello", "k1", Duration::from_secs(5))
        .await
        .unwrap_err();

    match err {
        ProviderError::Transport { timed_out, .. } => assert!(!timed_out),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_error_does_not_leak_query_credential() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let gateway = gateway_for(ProviderKind::Gemini, &format!("http://127.0.0.1:{}", port));
    let err = gateway
        .call("gemini", "gemini-pro", "hello", "super-secret", Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(!err.to_string().contains("super-secret"));
}

#[tokio::test]
async fn test_response_size_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(2048)))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap().with_max_response_size(1024);
    let adapter = ProviderKind::OpenAI.create_adapter(Some(mock_server.uri().as_str()));
    let request = llmgate_core::LlmRequest::new("openai", "gpt-4o", "hello", "k1");
    let wire = adapter.build_request(&request).unwrap();

    let err = client
        .send(&wire, &RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport { timed_out: false, .. }));
}

#[tokio::test]
async fn test_verify_credential_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("Authorization", "Bearer good"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OPENAI_SUCCESS))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "bad key"}})),
        )
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(ProviderKind::OpenAI, &mock_server.uri());

    assert_eq!(gateway.verify_credential("openai", "good").await, Ok(true));
    assert_eq!(gateway.verify_credential("openai", "bad").await, Ok(false));
}
