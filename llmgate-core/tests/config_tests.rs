//! Integration tests for configuration loading, validation and the facade

mod common;

use common::OPENAI_SUCCESS;
use llmgate_core::config::{load_from_json, load_from_yaml, ConfigError, ValidationErrorKind};
use llmgate_core::providers::ProviderError;
use llmgate_core::rag::StaticRetriever;
use llmgate_core::LlmGate;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test config file
fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_valid_yaml_config() {
    std::env::set_var("LLMGATE_IT_OPENAI_KEY", "test-key");

    let yaml = r#"
version: "0.1"
timeout_ms: 15000
providers:
  - id: openai
    api_key: ${LLMGATE_IT_OPENAI_KEY}
    default_model: gpt-4o
  - id: qwen
    api_key: q-key
rag:
  provider: openai
  use_retrieval: false
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", yaml);

    let config = load_from_yaml(path).unwrap();
    assert_eq!(config.version, "0.1");
    assert_eq!(config.timeout_ms, 15000);
    assert_eq!(config.providers.len(), 2);
    assert_eq!(config.credential("openai").unwrap().expose_secret(), "test-key");
    assert_eq!(config.model_for("qwen").as_deref(), Some("qwen-turbo"));
    assert!(!config.rag.unwrap().use_retrieval);

    std::env::remove_var("LLMGATE_IT_OPENAI_KEY");
}

#[test]
fn test_load_valid_json_config() {
    let json = r#"{
        "version": "0.1",
        "providers": [
            {"id": "anthropic", "api_key": "a-key"},
            {"id": "gemini", "api_key": "g-key", "default_model": "gemini-1.5-pro"}
        ]
    }"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.json", json);

    let config = load_from_json(path).unwrap();
    assert_eq!(config.timeout_ms, 30000);
    assert_eq!(config.model_for("gemini").as_deref(), Some("gemini-1.5-pro"));
    assert!(config.rag.is_none());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_from_yaml(dir.path().join("absent.yaml"));

    assert!(matches!(result, Err(ConfigError::IoError { .. })));
}

#[test]
fn test_missing_env_var() {
    let yaml = r#"
version: "0.1"
providers:
  - id: openai
    api_key: ${LLMGATE_IT_DEFINITELY_UNSET}
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", yaml);

    match load_from_yaml(path) {
        Err(ConfigError::EnvVarNotFound { var }) => assert_eq!(var, "LLMGATE_IT_DEFINITELY_UNSET"),
        other => panic!("expected EnvVarNotFound, got {:?}", other),
    }
}

#[test]
fn test_invalid_yaml_reports_location() {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", "version: \"0.1\"\nproviders: [\n");

    match load_from_yaml(path) {
        Err(ConfigError::ParseError { line, .. }) => assert!(line.is_some()),
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_validation_errors_surface() {
    let yaml = r#"
version: "0.1"
timeout_ms: 0
providers: []
"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", yaml);

    match load_from_yaml(path) {
        Err(ConfigError::ValidationError(err)) => {
            assert_eq!(err.field_path, "timeout_ms");
            assert!(matches!(err.kind, ValidationErrorKind::OutOfRange { .. }));
        }
        other => panic!("expected ValidationError, got {:?}", other),
    }
}

#[test]
fn test_config_debug_never_shows_keys() {
    let json = r#"{"version": "0.1", "providers": [{"id": "groq", "api_key": "gsk-very-secret"}]}"#;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.json", json);
    let config = load_from_json(path).unwrap();

    let debug = format!("{:?}", config);
    assert!(!debug.contains("gsk-very-secret"));
    assert!(debug.contains("[REDACTED]"));
}

#[tokio::test]
async fn test_facade_from_config_against_mock_vendor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer d-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OPENAI_SUCCESS))
        .mount(&mock_server)
        .await;

    let json = format!(
        r#"{{
            "version": "0.1",
            "timeout_ms": 5000,
            "providers": [{{"id": "deepseek", "api_key": "d-key", "base_url": "{}"}}],
            "rag": {{"provider": "deepseek"}}
        }}"#,
        mock_server.uri()
    );
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.json", &json);
    let config = load_from_json(path).unwrap();

    let gate = LlmGate::from_config(&config, Arc::new(StaticRetriever::new("docs"))).unwrap();

    let answer = gate.submit_rag_query("What is X?", true).await.unwrap();
    assert_eq!(answer.answer_text, "Hi there");
    assert_eq!(answer.model_used, "deepseek-chat");
    assert!(answer.rag_used);
    assert!(answer.context_found);

    let text = gate
        .submit_configured_query("deepseek", "hello")
        .await
        .unwrap();
    assert_eq!(text, "Hi there");

    let err = gate
        .submit_query("deepseek", "deepseek-chat", "hello", "")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Config(_)));

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
}

#[tokio::test]
async fn test_configured_rag_query_honors_use_retrieval() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/aigc/text-generation/generation"))
        .and(body_partial_json(serde_json::json!({"input": {"prompt": "What is X?"}})))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"output":{"text":"X"}}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let json = format!(
        r#"{{
            "version": "0.1",
            "providers": [{{"id": "qwen", "api_key": "q-key", "base_url": "{}"}}],
            "rag": {{"provider": "qwen", "use_retrieval": false}}
        }}"#,
        mock_server.uri()
    );
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.json", &json);
    let config = load_from_json(path).unwrap();

    let gate = LlmGate::from_config(&config, Arc::new(StaticRetriever::new("docs"))).unwrap();
    let answer = gate.submit_configured_rag_query("What is X?").await.unwrap();

    assert_eq!(answer.answer_text, "X");
    assert!(!answer.rag_used);
    assert!(!answer.context_found);
}
