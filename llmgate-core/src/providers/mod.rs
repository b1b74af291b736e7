//! Provider abstraction layer
//!
//! This module implements the adapters that translate between the
//! provider-agnostic request/response contract and each vendor's wire
//! protocol, and the registry that maps provider ids to those adapters.

pub mod adapter;
pub mod anthropic;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod qwen;
pub mod registry;

pub use adapter::{require_credential, require_model, ProviderAdapter, ProviderKind};
pub use error::{ProviderError, ProviderResult};
pub use registry::ProviderRegistry;

// Re-export concrete adapters
pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiCompatibleAdapter;
pub use qwen::QwenAdapter;
