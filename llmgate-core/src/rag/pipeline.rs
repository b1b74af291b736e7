//! Retrieval-augmented query pipeline

use crate::config::SecretString;
use crate::gateway::Gateway;
use crate::protocol::LlmRequest;
use crate::providers::ProviderResult;
use crate::rag::retriever::ContextRetriever;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Build the augmented prompt sent when retrieval is enabled
///
/// The context block is always present, even when the retriever found
/// nothing and `context_text` is empty.
pub fn compose_prompt(context_text: &str, prompt: &str) -> String {
    format!("Context: {}\n\nQuestion: {}\n\nAnswer:", context_text, prompt)
}

/// Provider, model and credential a pipeline answers with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTarget {
    pub provider_id: String,
    pub model: String,
    pub credential: SecretString,
}

impl ModelTarget {
    pub fn new(
        provider_id: impl Into<String>,
        model: impl Into<String>,
        credential: impl Into<SecretString>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            model: model.into(),
            credential: credential.into(),
        }
    }
}

/// Answer plus the metadata a chat UI displays next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagAnswer {
    pub answer_text: String,
    pub model_used: String,
    pub rag_used: bool,
    pub context_found: bool,
}

/// Composes retrieval with generation
#[derive(Clone)]
pub struct RagPipeline {
    gateway: Arc<Gateway>,
    retriever: Arc<dyn ContextRetriever>,
    target: ModelTarget,
    timeout: Duration,
}

impl RagPipeline {
    pub fn new(
        gateway: Arc<Gateway>,
        retriever: Arc<dyn ContextRetriever>,
        target: ModelTarget,
    ) -> Self {
        let timeout = gateway.default_timeout();
        Self {
            gateway,
            retriever,
            target,
            timeout,
        }
    }

    /// Override the per-call deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn target(&self) -> &ModelTarget {
        &self.target
    }

    /// Answer a prompt, optionally augmenting it with retrieved context
    ///
    /// Gateway errors are returned unchanged; there is no retry here.
    pub async fn query(&self, prompt: &str, use_retrieval: bool) -> ProviderResult<RagAnswer> {
        let (final_prompt, context_found) = if use_retrieval {
            let retrieved = self.retriever.retrieve(prompt).await;
            debug!(
                found = retrieved.found,
                context_len = retrieved.context_text.len(),
                "Context retrieved"
            );
            (compose_prompt(&retrieved.context_text, prompt), retrieved.found)
        } else {
            (prompt.to_string(), false)
        };

        let request = LlmRequest::new(
            self.target.provider_id.as_str(),
            self.target.model.as_str(),
            final_prompt,
            self.target.credential.clone(),
        );
        let response = self.gateway.execute(&request, self.timeout).await?;

        Ok(RagAnswer {
            answer_text: response.answer_text,
            model_used: response.model,
            rag_used: use_retrieval,
            context_found,
        })
    }
}
