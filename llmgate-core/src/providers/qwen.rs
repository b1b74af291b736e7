//! Qwen (Alibaba DashScope) provider implementation

use crate::protocol::{LlmRequest, WireRequest};
use crate::providers::adapter::{join_url, require_credential, require_model, ProviderAdapter};
use crate::providers::error::{ProviderError, ProviderResult};
use serde::{Deserialize, Serialize};

pub const QWEN_BASE_URL: &str = "https://dashscope.aliyuncs.com/api/v1";

const GENERATION_PATH: &str = "/services/aigc/text-generation/generation";

#[derive(Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    input: Input<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<Parameters>,
}

#[derive(Serialize)]
struct Input<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
struct Parameters {
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GenerationResponse {
    output: Option<Output>,
}

#[derive(Deserialize)]
struct Output {
    text: Option<String>,
}

/// Qwen provider implementation
#[derive(Debug, Clone)]
pub struct QwenAdapter {
    base_url: String,
}

impl QwenAdapter {
    /// Create a new Qwen adapter
    pub fn new() -> Self {
        Self {
            base_url: QWEN_BASE_URL.to_string(),
        }
    }

    /// Point the adapter at another server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for QwenAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for QwenAdapter {
    fn name(&self) -> &str {
        "qwen"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn default_model(&self) -> &str {
        "qwen-turbo"
    }

    fn probe_model(&self) -> &str {
        "qwen-turbo"
    }

    fn build_request(&self, request: &LlmRequest) -> ProviderResult<WireRequest> {
        let credential = require_credential(request.credential())?;
        let model = require_model(request.model())?;

        let body = serde_json::to_string(&GenerationRequest {
            model,
            input: Input {
                prompt: request.prompt(),
            },
            parameters: request.max_tokens().map(|max_tokens| Parameters { max_tokens }),
        })?;

        Ok(WireRequest::json(join_url(&self.base_url, GENERATION_PATH), body)
            .with_header("Authorization", format!("Bearer {}", credential)))
    }

    fn extract_answer(&self, body: &str) -> ProviderResult<String> {
        let response: GenerationResponse = serde_json::from_str(body)?;

        response
            .output
            .and_then(|output| output.text)
            .ok_or_else(|| ProviderError::parse("missing output.text"))
    }
}
