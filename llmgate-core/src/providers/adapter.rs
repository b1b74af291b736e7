//! Provider adapter trait and built-in provider kinds
//!
//! An adapter is a pure translation between the provider-agnostic
//! `LlmRequest` and one vendor's wire protocol. Adapters hold only
//! construction-time settings (base URL, vendor name) and never mutate.

use crate::config::SecretString;
use crate::http::error::{extract_error_message, is_success};
use crate::protocol::{LlmRequest, WireRequest};
use crate::providers::error::{ProviderError, ProviderResult};
use crate::providers::{anthropic, gemini, openai, qwen};
use crate::providers::{AnthropicAdapter, GeminiAdapter, OpenAiCompatibleAdapter, QwenAdapter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Core adapter trait that every vendor integration implements
pub trait ProviderAdapter: Send + Sync {
    /// Vendor family name, used in logs
    fn name(&self) -> &str;

    /// Base URL requests are built against
    fn base_url(&self) -> &str;

    /// Model used when configuration does not name one
    fn default_model(&self) -> &str;

    /// Inexpensive model used for credential verification
    fn probe_model(&self) -> &str;

    /// Build the vendor request, embedding the credential the vendor's way
    fn build_request(&self, request: &LlmRequest) -> ProviderResult<WireRequest>;

    /// Pull the answer text out of a success body
    fn extract_answer(&self, body: &str) -> ProviderResult<String>;

    /// Pull the vendor's own message out of an error body
    fn error_message(&self, body: &str) -> Option<String> {
        extract_error_message(body)
    }

    /// Classify a response: answer text on 2xx, `Upstream` otherwise
    fn parse_response(&self, status: u16, body: &str) -> ProviderResult<String> {
        if !is_success(status) {
            return Err(ProviderError::Upstream {
                status,
                message: self
                    .error_message(body)
                    .unwrap_or_else(|| body.to_string()),
            });
        }

        self.extract_answer(body)
    }
}

/// Reject a blank credential before anything is built or sent
pub fn require_credential(credential: &SecretString) -> ProviderResult<&str> {
    if credential.is_blank() {
        return Err(ProviderError::Config(
            "credential is missing or blank".to_string(),
        ));
    }
    Ok(credential.expose_secret())
}

/// Reject a blank model identifier
pub fn require_model(model: &str) -> ProviderResult<&str> {
    if model.trim().is_empty() {
        return Err(ProviderError::Config(
            "model is missing or blank".to_string(),
        ));
    }
    Ok(model)
}

/// Join a base URL and an endpoint path without doubling the slash
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// The single user turn every chat-style vendor expects
#[derive(Debug, Serialize)]
pub(crate) struct UserMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> UserMessage<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

/// Built-in provider identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Groq,
    DeepSeek,
    Anthropic,
    Claude,
    Gemini,
    Qwen,
}

impl ProviderKind {
    /// Every built-in provider, in registration order
    pub const ALL: [ProviderKind; 7] = [
        ProviderKind::OpenAI,
        ProviderKind::Groq,
        ProviderKind::DeepSeek,
        ProviderKind::Anthropic,
        ProviderKind::Claude,
        ProviderKind::Gemini,
        ProviderKind::Qwen,
    ];

    /// The registry id for this provider
    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Groq => "groq",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Claude => "claude",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Qwen => "qwen",
        }
    }

    /// Resolve a registry id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// The vendor's public base URL
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => openai::OPENAI_BASE_URL,
            ProviderKind::Groq => openai::GROQ_BASE_URL,
            ProviderKind::DeepSeek => openai::DEEPSEEK_BASE_URL,
            ProviderKind::Anthropic | ProviderKind::Claude => anthropic::ANTHROPIC_BASE_URL,
            ProviderKind::Gemini => gemini::GEMINI_BASE_URL,
            ProviderKind::Qwen => qwen::QWEN_BASE_URL,
        }
    }

    /// Create an adapter for this provider, optionally against another base URL
    pub fn create_adapter(&self, base_url: Option<&str>) -> Arc<dyn ProviderAdapter> {
        let base_url = base_url.unwrap_or(self.default_base_url());

        match self {
            ProviderKind::OpenAI => {
                Arc::new(OpenAiCompatibleAdapter::openai().with_base_url(base_url))
            }
            ProviderKind::Groq => Arc::new(OpenAiCompatibleAdapter::groq().with_base_url(base_url)),
            ProviderKind::DeepSeek => {
                Arc::new(OpenAiCompatibleAdapter::deepseek().with_base_url(base_url))
            }
            ProviderKind::Anthropic | ProviderKind::Claude => {
                Arc::new(AnthropicAdapter::new().with_base_url(base_url))
            }
            ProviderKind::Gemini => Arc::new(GeminiAdapter::new().with_base_url(base_url)),
            ProviderKind::Qwen => Arc::new(QwenAdapter::new().with_base_url(base_url)),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
