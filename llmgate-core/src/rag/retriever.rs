//! Context retrieval boundary
//!
//! The gateway never searches anything itself. A `ContextRetriever` is
//! whatever knowledge base the host application plugs in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What a retriever found for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Retrieved text; empty when nothing was found
    pub context_text: String,

    /// Whether the retriever found anything relevant
    pub found: bool,
}

impl RetrievalResult {
    /// A hit carrying context text
    pub fn found(context_text: impl Into<String>) -> Self {
        Self {
            context_text: context_text.into(),
            found: true,
        }
    }

    /// A miss
    pub fn not_found() -> Self {
        Self {
            context_text: String::new(),
            found: false,
        }
    }
}

/// Trait for context sources consulted before generation
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// Look up context for a query
    async fn retrieve(&self, query: &str) -> RetrievalResult;
}

/// Retriever that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRetriever;

#[async_trait]
impl ContextRetriever for NoopRetriever {
    async fn retrieve(&self, _query: &str) -> RetrievalResult {
        RetrievalResult::not_found()
    }
}

/// Retriever that answers every query with the same context
///
/// An empty or whitespace-only context is reported as not found.
#[derive(Debug, Clone, Default)]
pub struct StaticRetriever {
    context_text: String,
}

impl StaticRetriever {
    pub fn new(context_text: impl Into<String>) -> Self {
        Self {
            context_text: context_text.into(),
        }
    }
}

#[async_trait]
impl ContextRetriever for StaticRetriever {
    async fn retrieve(&self, _query: &str) -> RetrievalResult {
        if self.context_text.trim().is_empty() {
            RetrievalResult::not_found()
        } else {
            RetrievalResult::found(self.context_text.clone())
        }
    }
}
