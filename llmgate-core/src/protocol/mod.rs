//! Protocol module for LLM request/response structures
//!
//! This module defines the provider-agnostic data model the gateway speaks:
//! - `LlmRequest`: what the caller asks
//! - `WireRequest`: what an adapter sends
//! - `LlmResponse`: what the caller gets back

pub mod types;

pub use types::{LlmRequest, LlmResponse, WireRequest};
