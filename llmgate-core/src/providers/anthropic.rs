//! Anthropic provider implementation
//!
//! Implements the adapter for Anthropic's Messages API. Registered under both
//! `anthropic` and `claude`.

use crate::protocol::{LlmRequest, WireRequest};
use crate::providers::adapter::{
    join_url, require_credential, require_model, ProviderAdapter, UserMessage,
};
use crate::providers::error::{ProviderError, ProviderResult};
use serde::{Deserialize, Serialize};

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Value of the `anthropic-version` header
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The Messages API requires `max_tokens` on every request
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Anthropic provider implementation
#[derive(Debug, Clone)]
pub struct AnthropicAdapter {
    base_url: String,
}

impl AnthropicAdapter {
    /// Create a new Anthropic adapter
    pub fn new() -> Self {
        Self {
            base_url: ANTHROPIC_BASE_URL.to_string(),
        }
    }

    /// Point the adapter at another server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for AnthropicAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for AnthropicAdapter {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn default_model(&self) -> &str {
        "claude-3-5-sonnet-20240620"
    }

    fn probe_model(&self) -> &str {
        "claude-3-sonnet-20240229"
    }

    fn build_request(&self, request: &LlmRequest) -> ProviderResult<WireRequest> {
        let credential = require_credential(request.credential())?;
        let model = require_model(request.model())?;

        let body = serde_json::to_string(&MessagesRequest {
            model,
            max_tokens: request.max_tokens().unwrap_or(DEFAULT_MAX_TOKENS),
            messages: [UserMessage::new(request.prompt())],
        })?;

        Ok(WireRequest::json(join_url(&self.base_url, "/messages"), body)
            .with_header("x-api-key", credential)
            .with_header("anthropic-version", ANTHROPIC_VERSION))
    }

    fn extract_answer(&self, body: &str) -> ProviderResult<String> {
        let response: MessagesResponse = serde_json::from_str(body)?;

        response
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| ProviderError::parse("missing content[0].text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_build_request_exact_shape() {
        let wire = AnthropicAdapter::new()
            .build_request(&LlmRequest::new("anthropic", "gpt-4o", "hello", "k1"))
            .unwrap();

        assert_eq!(wire.url, "https://api.anthropic.com/v1/messages");
        assert_eq!(
            wire.headers,
            BTreeMap::from([
                ("Content-Type".to_string(), "application/json".to_string()),
                ("anthropic-version".to_string(), "2023-06-01".to_string()),
                ("x-api-key".to_string(), "k1".to_string()),
            ])
        );
        assert_eq!(
            wire.body_json().unwrap(),
            json!({
                "model": "gpt-4o",
                "max_tokens": 1000,
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[test]
    fn test_explicit_max_tokens() {
        let request = LlmRequest::new("claude", "claude-3-haiku", "hi", "k1").with_max_tokens(5);
        let wire = AnthropicAdapter::new().build_request(&request).unwrap();
        assert_eq!(wire.body_json().unwrap()["max_tokens"], json!(5));
    }

    #[test]
    fn test_extract_first_content_block() {
        let body = r#"{"content":[{"type":"text","text":"hi"},{"type":"text","text":"later"}]}"#;
        assert_eq!(AnthropicAdapter::new().parse_response(200, body).unwrap(), "hi");
    }

    #[test]
    fn test_tool_only_content_is_parse_error() {
        let body = r#"{"content":[{"type":"tool_use","id":"t1"}]}"#;
        assert!(matches!(
            AnthropicAdapter::new().parse_response(200, body),
            Err(ProviderError::Parse { .. })
        ));
    }

    #[test]
    fn test_error_payload() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(
            AnthropicAdapter::new().parse_response(529, body).unwrap_err(),
            ProviderError::Upstream {
                status: 529,
                message: "Overloaded".to_string()
            }
        );
    }
}
