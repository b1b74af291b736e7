//! HTTP layer for sending prepared requests to LLM providers
//!
//! This module implements the transport seam of the gateway:
//! - `HttpTransport`: one bounded POST exchange per call
//! - `HttpClient`: the reqwest-backed transport with connection pooling
//! - Error payload and status helpers shared by the adapters

pub mod client;
pub mod error;

use crate::protocol::WireRequest;
use crate::providers::ProviderError;
use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

/// Default deadline for one outbound exchange
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-call options for an HTTP exchange
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Unique request ID for log correlation
    pub request_id: Uuid,

    /// Deadline for the whole exchange, including reading the body
    pub timeout: Duration,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RequestOptions {
    /// Create new request options with a generated request ID
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout for this request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Status and body of a completed exchange, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Trait for transports that carry one `WireRequest` to its vendor
///
/// Implementations make exactly one attempt. Any failure to obtain a
/// response, including the deadline passing, is `ProviderError::Transport`.
/// Non-success statuses are not errors at this layer.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(
        &self,
        request: &WireRequest,
        options: &RequestOptions,
    ) -> Result<RawResponse, ProviderError>;
}
