//! Google Gemini provider implementation
//!
//! Gemini takes the credential as a `key` query parameter and names the model
//! in the URL path rather than the body.

use crate::protocol::{LlmRequest, WireRequest};
use crate::providers::adapter::{require_credential, require_model, ProviderAdapter};
use crate::providers::error::{ProviderError, ProviderResult};
use serde::{Deserialize, Serialize};
use url::Url;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini provider implementation
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    base_url: String,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter
    pub fn new() -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Point the adapter at another server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl GeminiAdapter {
    /// `{base}/models/{model}:generateContent?key={credential}`
    ///
    /// The model is pushed as a single escaped path segment, so `/`, `?` and
    /// `#` in it cannot move the request to another endpoint.
    fn endpoint(&self, model: &str, credential: &str) -> ProviderResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ProviderError::Config(format!("invalid Gemini base URL '{}': {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::Config(format!(
                    "Gemini base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("models")
            .push(&format!("{}:generateContent", model));
        url.query_pairs_mut().append_pair("key", credential);

        Ok(url)
    }
}

impl Default for GeminiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn name(&self) -> &str {
        "gemini"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn default_model(&self) -> &str {
        "gemini-1.5-flash"
    }

    fn probe_model(&self) -> &str {
        "gemini-pro"
    }

    fn build_request(&self, request: &LlmRequest) -> ProviderResult<WireRequest> {
        let credential = require_credential(request.credential())?;
        let model = require_model(request.model())?;

        let url = self.endpoint(model, credential)?;

        let body = serde_json::to_string(&GenerateContentRequest {
            contents: [Content {
                parts: [Part {
                    text: request.prompt(),
                }],
            }],
            generation_config: request
                .max_tokens()
                .map(|max_output_tokens| GenerationConfig { max_output_tokens }),
        })?;

        Ok(WireRequest::json(url.as_str(), body))
    }

    fn extract_answer(&self, body: &str) -> ProviderResult<String> {
        let response: GenerateContentResponse = serde_json::from_str(body)?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| ProviderError::parse("missing candidates[0].content.parts[0].text"))
    }
}
