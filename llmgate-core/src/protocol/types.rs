//! Core protocol types for LLM interactions
//!
//! `LlmRequest` is the provider-agnostic question a caller asks. Adapters turn
//! it into a `WireRequest`, and the gateway turns a successful round trip back
//! into an `LlmResponse`.

use crate::config::secrets::redact_by_field_name;
use crate::config::SecretString;
use crate::http::error::redact_url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single prompt addressed to one provider and model
///
/// Fields are private so a request cannot change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmRequest {
    provider_id: String,
    model: String,
    prompt: String,
    credential: SecretString,
    max_tokens: Option<u32>,
}

impl LlmRequest {
    /// Create a new request
    pub fn new(
        provider_id: impl Into<String>,
        model: impl Into<String>,
        prompt: impl Into<String>,
        credential: impl Into<SecretString>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            model: model.into(),
            prompt: prompt.into(),
            credential: credential.into(),
            max_tokens: None,
        }
    }

    /// Cap the number of generated tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn credential(&self) -> &SecretString {
        &self.credential
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }
}

/// A fully prepared vendor HTTP request
///
/// Always sent as a POST. Headers are kept ordered so two builds from the
/// same inputs compare and serialize identically.
#[derive(Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// Absolute endpoint URL, including any credential query parameter
    pub url: String,

    /// Header name to value
    pub headers: BTreeMap<String, String>,

    /// Serialized JSON body
    pub body: String,
}

impl WireRequest {
    /// Create a JSON request with a `Content-Type: application/json` header
    pub fn json(url: impl Into<String>, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            url: url.into(),
            headers,
            body,
        }
    }

    /// Add a header, replacing any previous value
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Parse the body back into a JSON value
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

// Credentials live in headers or the query string, so neither is printed.
impl fmt::Debug for WireRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, String> = self
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), redact_by_field_name(name, value)))
            .collect();

        f.debug_struct("WireRequest")
            .field("url", &redact_url(&self.url))
            .field("headers", &headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// A successful answer from a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Extracted answer text
    pub answer_text: String,

    /// Provider id the request was dispatched to
    pub provider_id: String,

    /// Model that produced the answer
    pub model: String,

    /// Raw response body, kept for diagnostics
    pub raw: String,
}
