//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use llmgate_core::http::{HttpTransport, RawResponse, RequestOptions};
use llmgate_core::protocol::WireRequest;
use llmgate_core::providers::{ProviderError, ProviderRegistry};
use llmgate_core::Gateway;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Transport that records every request and replays one canned outcome
pub struct RecordingTransport {
    outcome: Result<RawResponse, ProviderError>,
    calls: AtomicUsize,
    requests: Mutex<Vec<WireRequest>>,
}

impl RecordingTransport {
    pub fn responding(status: u16, body: &str) -> Arc<Self> {
        Self::with_outcome(Ok(RawResponse::new(status, body)))
    }

    pub fn failing(error: ProviderError) -> Arc<Self> {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<RawResponse, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<WireRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> WireRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(
        &self,
        request: &WireRequest,
        _options: &RequestOptions,
    ) -> Result<RawResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }
}

/// Gateway over the default registry and the given transport
pub fn gateway_with(transport: Arc<RecordingTransport>) -> Gateway {
    Gateway::new(Arc::new(ProviderRegistry::with_defaults()), transport)
}

pub const OPENAI_SUCCESS: &str =
    r#"{"choices":[{"message":{"role":"assistant","content":"Hi there"}}]}"#;

/// Route library logs to the test harness output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("llmgate_core=debug")),
        )
        .with_test_writer()
        .try_init();
}
