//! HTTP client implementation using reqwest

use crate::http::error::redact_url;
use crate::http::{HttpTransport, RawResponse, RequestOptions};
use crate::protocol::WireRequest;
use crate::providers::ProviderError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};

/// Maximum response size (10MB)
const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024;

/// Default user agent
const USER_AGENT: &str = concat!("llmgate/", env!("CARGO_PKG_VERSION"));

/// HTTP transport with connection pooling
///
/// The pooled `reqwest::Client` is built once; every `send` builds and owns
/// its own request, which is dropped on every exit path.
#[derive(Clone)]
pub struct HttpClient {
    /// The underlying reqwest client
    client: Client,

    /// Maximum response size to prevent OOM
    max_response_size: usize,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_config(Duration::from_secs(10), 10)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(
        connect_timeout: Duration,
        max_idle_per_host: usize,
    ) -> Result<Self, ProviderError> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(connect_timeout)
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_response_size: MAX_RESPONSE_SIZE,
        })
    }

    /// Override the response size limit
    pub fn with_max_response_size(mut self, max_response_size: usize) -> Self {
        self.max_response_size = max_response_size;
        self
    }

    fn too_large(&self, size: usize) -> ProviderError {
        ProviderError::Transport {
            message: format!(
                "Response size {} exceeds maximum {}",
                size, self.max_response_size
            ),
            timed_out: false,
        }
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    async fn send(
        &self,
        request: &WireRequest,
        options: &RequestOptions,
    ) -> Result<RawResponse, ProviderError> {
        let request_id = options.request_id;
        debug!(
            %request_id,
            url = %redact_url(&request.url),
            timeout_ms = options.timeout.as_millis() as u64,
            "Sending request"
        );

        let mut builder = self
            .client
            .post(&request.url)
            .timeout(options.timeout)
            .body(request.body.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(|e| {
            let err = ProviderError::from(e);
            warn!(%request_id, error = %err, "Request failed before a response arrived");
            err
        })?;

        let status = response.status().as_u16();
        debug!(%request_id, status, "Response received");

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_size {
                return Err(self.too_large(content_length as usize));
            }
        }

        let body = response.text().await.map_err(|e| {
            let err = ProviderError::from(e);
            warn!(%request_id, error = %err, "Failed to read response body");
            err
        })?;

        if body.len() > self.max_response_size {
            return Err(self.too_large(body.len()));
        }

        Ok(RawResponse { status, body })
    }
}
