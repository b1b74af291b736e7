//! OpenAI-compatible provider implementation
//!
//! OpenAI, Groq and DeepSeek speak the same chat completions protocol and
//! differ only in base URL and model names, so one adapter serves all three.

use crate::protocol::{LlmRequest, WireRequest};
use crate::providers::adapter::{
    join_url, require_credential, require_model, ProviderAdapter, UserMessage,
};
use crate::providers::error::{ProviderError, ProviderResult};
use serde::{Deserialize, Serialize};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [UserMessage<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Adapter for the OpenAI chat completions protocol
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleAdapter {
    name: &'static str,
    base_url: String,
    default_model: &'static str,
    probe_model: &'static str,
}

impl OpenAiCompatibleAdapter {
    /// OpenAI itself
    pub fn openai() -> Self {
        Self {
            name: "openai",
            base_url: OPENAI_BASE_URL.to_string(),
            default_model: "gpt-4o",
            probe_model: "gpt-3.5-turbo",
        }
    }

    /// Groq's OpenAI-compatible endpoint
    pub fn groq() -> Self {
        Self {
            name: "groq",
            base_url: GROQ_BASE_URL.to_string(),
            default_model: "mixtral-8x7b-32768",
            probe_model: "mixtral-8x7b-32768",
        }
    }

    /// DeepSeek's OpenAI-compatible endpoint
    pub fn deepseek() -> Self {
        Self {
            name: "deepseek",
            base_url: DEEPSEEK_BASE_URL.to_string(),
            default_model: "deepseek-chat",
            probe_model: "deepseek-chat",
        }
    }

    /// Point the adapter at another compatible server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for OpenAiCompatibleAdapter {
    fn default() -> Self {
        Self::openai()
    }
}

impl ProviderAdapter for OpenAiCompatibleAdapter {
    fn name(&self) -> &str {
        self.name
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn default_model(&self) -> &str {
        self.default_model
    }

    fn probe_model(&self) -> &str {
        self.probe_model
    }

    fn build_request(&self, request: &LlmRequest) -> ProviderResult<WireRequest> {
        let credential = require_credential(request.credential())?;
        let model = require_model(request.model())?;

        let body = serde_json::to_string(&ChatCompletionRequest {
            model,
            messages: [UserMessage::new(request.prompt())],
            max_tokens: request.max_tokens(),
        })?;

        Ok(
            WireRequest::json(join_url(&self.base_url, CHAT_COMPLETIONS_PATH), body)
                .with_header("Authorization", format!("Bearer {}", credential)),
        )
    }

    fn extract_answer(&self, body: &str) -> ProviderResult<String> {
        let response: ChatCompletionResponse = serde_json::from_str(body)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| ProviderError::parse("missing choices[0].message.content"))
    }
}
