//! llmgate Core Library
//!
//! A gateway that normalizes one question to many LLM vendors: a provider
//! registry of adapters that turn a normalized request into vendor HTTP and
//! back, a single-call gateway with a unified error taxonomy, and an optional
//! retrieval-augmented pipeline on top.

pub mod config;
pub mod gate;
pub mod gateway;
pub mod http;
pub mod protocol;
pub mod providers;
pub mod rag;

pub use config::{GatewayConfig, SecretString};
pub use gate::LlmGate;
pub use gateway::Gateway;
pub use http::{client::HttpClient, HttpTransport, RawResponse, RequestOptions};
pub use protocol::{LlmRequest, LlmResponse, WireRequest};
pub use providers::{
    ProviderAdapter, ProviderError, ProviderKind, ProviderRegistry, ProviderResult,
};
pub use rag::{
    ContextRetriever, NoopRetriever, RagAnswer, RagPipeline, RetrievalResult, StaticRetriever,
};

/// Returns the version of the llmgate core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
