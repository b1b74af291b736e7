//! `LlmGate`: the inbound facade chat front ends call
//!
//! Wraps a `Gateway`, the credentials from a `GatewayConfig` and an optional
//! `RagPipeline` behind the two calls a chat UI makes.

use crate::config::{GatewayConfig, SecretString};
use crate::gateway::Gateway;
use crate::http::client::HttpClient;
use crate::providers::{ProviderError, ProviderResult};
use crate::rag::{ContextRetriever, ModelTarget, RagAnswer, RagPipeline};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Configured credential and model for one provider id
#[derive(Debug, Clone)]
struct ProviderDefaults {
    credential: SecretString,
    model: Option<String>,
}

/// Query facade over a gateway and an optional RAG pipeline
#[derive(Clone)]
pub struct LlmGate {
    gateway: Arc<Gateway>,
    pipeline: Option<RagPipeline>,
    use_retrieval: bool,
    defaults: HashMap<String, ProviderDefaults>,
}

impl LlmGate {
    /// Assemble a facade from parts; no configured credentials
    ///
    /// `submit_configured_rag_query` retrieves context unless changed with
    /// `with_retrieval_default`.
    pub fn new(gateway: Arc<Gateway>, pipeline: Option<RagPipeline>) -> Self {
        Self {
            gateway,
            pipeline,
            use_retrieval: true,
            defaults: HashMap::new(),
        }
    }

    /// Set whether `submit_configured_rag_query` retrieves context
    pub fn with_retrieval_default(mut self, use_retrieval: bool) -> Self {
        self.use_retrieval = use_retrieval;
        self
    }

    /// Build the full stack from a validated configuration
    ///
    /// The RAG pipeline is only created when the configuration has a `rag`
    /// section.
    pub fn from_config(
        config: &GatewayConfig,
        retriever: Arc<dyn ContextRetriever>,
    ) -> ProviderResult<Self> {
        let registry = Arc::new(config.build_registry()?);
        let transport = Arc::new(HttpClient::new()?);
        let gateway =
            Arc::new(Gateway::new(registry, transport).with_default_timeout(config.timeout()));

        let pipeline = match &config.rag {
            Some(rag) => {
                let credential = config.credential(&rag.provider).cloned().ok_or_else(|| {
                    ProviderError::Config(format!(
                        "RAG provider '{}' has no configured credential",
                        rag.provider
                    ))
                })?;
                let model = rag
                    .model
                    .clone()
                    .or_else(|| config.model_for(&rag.provider))
                    .ok_or_else(|| {
                        ProviderError::Config(format!(
                            "no model configured for RAG provider '{}'",
                            rag.provider
                        ))
                    })?;
                let target = ModelTarget::new(rag.provider.as_str(), model, credential);
                Some(RagPipeline::new(Arc::clone(&gateway), retriever, target))
            }
            None => None,
        };

        let defaults = config
            .providers
            .iter()
            .map(|provider| {
                (
                    provider.id.clone(),
                    ProviderDefaults {
                        credential: provider.api_key.clone(),
                        model: config.model_for(&provider.id),
                    },
                )
            })
            .collect();

        info!(
            providers = config.providers.len(),
            rag = config.rag.is_some(),
            "LLM gate configured"
        );

        Ok(Self {
            gateway,
            pipeline,
            use_retrieval: config.rag.as_ref().map_or(true, |rag| rag.use_retrieval),
            defaults,
        })
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn pipeline(&self) -> Option<&RagPipeline> {
        self.pipeline.as_ref()
    }

    /// Ask one provider one question with an explicit model and credential
    pub async fn submit_query(
        &self,
        provider_id: &str,
        model: &str,
        prompt: &str,
        credential: impl Into<SecretString>,
    ) -> ProviderResult<String> {
        let response = self
            .gateway
            .call(
                provider_id,
                model,
                prompt,
                credential,
                self.gateway.default_timeout(),
            )
            .await?;
        Ok(response.answer_text)
    }

    /// Ask a configured provider, using its configured credential and model
    pub async fn submit_configured_query(
        &self,
        provider_id: &str,
        prompt: &str,
    ) -> ProviderResult<String> {
        // Unknown ids surface as UnsupportedProvider, not as missing config
        self.gateway.registry().lookup(provider_id)?;

        let defaults = self.defaults.get(provider_id).ok_or_else(|| {
            ProviderError::Config(format!("provider '{}' is not configured", provider_id))
        })?;
        let model = defaults.model.as_deref().ok_or_else(|| {
            ProviderError::Config(format!("no model configured for '{}'", provider_id))
        })?;

        self.submit_query(provider_id, model, prompt, defaults.credential.clone())
            .await
    }

    /// Answer a prompt through the RAG pipeline
    pub async fn submit_rag_query(
        &self,
        prompt: &str,
        use_retrieval: bool,
    ) -> ProviderResult<RagAnswer> {
        let pipeline = self
            .pipeline
            .as_ref()
            .ok_or_else(|| ProviderError::Config("RAG pipeline is not configured".to_string()))?;
        pipeline.query(prompt, use_retrieval).await
    }

    /// Answer a prompt through the RAG pipeline with the configured
    /// `rag.use_retrieval` setting
    pub async fn submit_configured_rag_query(&self, prompt: &str) -> ProviderResult<RagAnswer> {
        self.submit_rag_query(prompt, self.use_retrieval).await
    }
}

impl std::fmt::Debug for LlmGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut configured: Vec<&String> = self.defaults.keys().collect();
        configured.sort();
        f.debug_struct("LlmGate")
            .field("gateway", &self.gateway)
            .field("rag", &self.pipeline.as_ref().map(RagPipeline::target))
            .field("use_retrieval", &self.use_retrieval)
            .field("configured", &configured)
            .finish()
    }
}
