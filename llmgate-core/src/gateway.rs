//! Gateway: the single entry point for "ask a language model"
//!
//! One call is one adapter lookup, one request build, at most one HTTP
//! exchange and one classification of the outcome. Nothing is retried.

use crate::config::SecretString;
use crate::http::client::HttpClient;
use crate::http::{HttpTransport, RequestOptions, DEFAULT_TIMEOUT};
use crate::protocol::{LlmRequest, LlmResponse};
use crate::providers::{ProviderError, ProviderRegistry, ProviderResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Prompt sent when verifying a credential
const PROBE_PROMPT: &str = "Hello";

/// Token cap for verification probes
const PROBE_MAX_TOKENS: u32 = 5;

/// Dispatches normalized requests to the right provider adapter
#[derive(Clone)]
pub struct Gateway {
    registry: Arc<ProviderRegistry>,
    transport: Arc<dyn HttpTransport>,
    default_timeout: Duration,
}

impl Gateway {
    /// Create a gateway over a registry and a transport
    pub fn new(registry: Arc<ProviderRegistry>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            registry,
            transport,
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a gateway that talks to vendors through a pooled `HttpClient`
    pub fn with_http_client(registry: Arc<ProviderRegistry>) -> ProviderResult<Self> {
        Ok(Self::new(registry, Arc::new(HttpClient::new()?)))
    }

    /// Set the deadline used by `execute_default` and credential probes
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Ask one provider one question
    pub async fn call(
        &self,
        provider_id: &str,
        model: &str,
        prompt: &str,
        credential: impl Into<SecretString>,
        timeout: Duration,
    ) -> ProviderResult<LlmResponse> {
        let request = LlmRequest::new(provider_id, model, prompt, credential);
        self.execute(&request, timeout).await
    }

    /// Execute a prepared request with the default deadline
    pub async fn execute_default(&self, request: &LlmRequest) -> ProviderResult<LlmResponse> {
        self.execute(request, self.default_timeout).await
    }

    /// Execute a prepared request
    ///
    /// Unknown providers and blank credentials fail before the transport is
    /// touched. A response is only returned after the body parsed cleanly.
    pub async fn execute(
        &self,
        request: &LlmRequest,
        timeout: Duration,
    ) -> ProviderResult<LlmResponse> {
        let adapter = self.registry.lookup(request.provider_id())?;
        let wire = adapter.build_request(request)?;
        let options = RequestOptions::new().with_timeout(timeout);

        info!(
            request_id = %options.request_id,
            provider = request.provider_id(),
            model = request.model(),
            "Dispatching LLM request"
        );

        let response = self.transport.send(&wire, &options).await?;

        let answer_text = adapter
            .parse_response(response.status, &response.body)
            .map_err(|err| {
                warn!(
                    request_id = %options.request_id,
                    provider = request.provider_id(),
                    status = response.status,
                    error = %err,
                    "Provider call failed"
                );
                err
            })?;

        debug!(
            request_id = %options.request_id,
            answer_len = answer_text.len(),
            "LLM request completed"
        );

        Ok(LlmResponse {
            answer_text,
            provider_id: request.provider_id().to_string(),
            model: request.model().to_string(),
            raw: response.body,
        })
    }

    /// Check a credential with one minimal probe request
    ///
    /// `Ok(false)` means the vendor rejected the probe with a non-success
    /// status. Every other failure is returned as an error.
    pub async fn verify_credential(
        &self,
        provider_id: &str,
        credential: impl Into<SecretString>,
    ) -> ProviderResult<bool> {
        let adapter = self.registry.lookup(provider_id)?;
        let request = LlmRequest::new(provider_id, adapter.probe_model(), PROBE_PROMPT, credential)
            .with_max_tokens(PROBE_MAX_TOKENS);

        match self.execute(&request, self.default_timeout).await {
            Ok(_) => Ok(true),
            Err(ProviderError::Upstream { status, .. }) => {
                debug!(provider = provider_id, status, "Credential rejected");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("registry", &self.registry)
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}
