//! Configuration schema structures with serde support

use super::error::{ValidationError, ValidationErrorKind};
use super::secrets::SecretString;
use crate::providers::{ProviderKind, ProviderRegistry, ProviderResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// The only schema version this crate understands
pub const CONFIG_VERSION: &str = "0.1";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Schema version (required - no default)
    pub version: String,

    /// Deadline for one outbound exchange, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Credentials and overrides per provider
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,

    /// Retrieval-augmented query settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rag: Option<RagConfig>,
}

/// Settings for one provider id
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Registry id (openai, groq, deepseek, anthropic, claude, gemini, qwen)
    pub id: String,

    /// API key (supports environment variable interpolation)
    pub api_key: SecretString,

    /// Model used when a caller does not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// Replacement for the vendor's public base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Settings for the RAG pipeline
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RagConfig {
    /// Provider id that answers RAG queries
    pub provider: String,

    /// Model to use; falls back to the provider's default model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Retrieval setting used by `LlmGate::submit_configured_rag_query`
    #[serde(default = "default_true")]
    pub use_retrieval: bool,
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_true() -> bool {
    true
}

impl GatewayConfig {
    /// Create an empty configuration at the current version
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            timeout_ms: default_timeout_ms(),
            providers: Vec::new(),
            rag: None,
        }
    }

    /// Deadline for one outbound exchange
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Settings for a provider id
    pub fn provider(&self, id: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|provider| provider.id == id)
    }

    /// Configured credential for a provider id
    pub fn credential(&self, id: &str) -> Option<&SecretString> {
        self.provider(id).map(|provider| &provider.api_key)
    }

    /// Configured default model for a provider id, else the adapter's own
    pub fn model_for(&self, id: &str) -> Option<String> {
        if let Some(model) = self.provider(id).and_then(|p| p.default_model.clone()) {
            return Some(model);
        }
        ProviderKind::from_id(id)
            .map(|kind| kind.create_adapter(None).default_model().to_string())
    }

    /// Build a registry of every built-in provider, honoring base URL overrides
    pub fn build_registry(&self) -> ProviderResult<ProviderRegistry> {
        let mut registry = ProviderRegistry::new();
        for kind in ProviderKind::ALL {
            let base_url = self
                .provider(kind.id())
                .and_then(|provider| provider.base_url.as_deref());
            registry.register(kind.id(), kind.create_adapter(base_url))?;
        }
        Ok(registry)
    }

    /// Structural validation: version, ids, timeout and references
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version != CONFIG_VERSION {
            return Err(ValidationError::new(
                "version",
                ValidationErrorKind::InvalidVersion {
                    expected: CONFIG_VERSION.to_string(),
                    actual: self.version.clone(),
                },
            ));
        }

        if self.timeout_ms == 0 || self.timeout_ms > 600_000 {
            return Err(ValidationError::out_of_range(
                "timeout_ms",
                format!("must be between 1 and 600000, got {}", self.timeout_ms),
            ));
        }

        let mut seen = HashSet::new();
        for (index, provider) in self.providers.iter().enumerate() {
            let path = format!("providers[{}]", index);

            if provider.id.trim().is_empty() {
                return Err(ValidationError::required(format!("{}.id", path)));
            }
            if ProviderKind::from_id(&provider.id).is_none() {
                return Err(ValidationError::new(
                    format!("{}.id", path),
                    ValidationErrorKind::UnknownProvider {
                        id: provider.id.clone(),
                    },
                ));
            }
            if !seen.insert(provider.id.as_str()) {
                return Err(ValidationError::new(
                    format!("{}.id", path),
                    ValidationErrorKind::DuplicateValue {
                        value: provider.id.clone(),
                    },
                ));
            }
        }

        if let Some(rag) = &self.rag {
            if self.provider(&rag.provider).is_none() {
                return Err(ValidationError::new(
                    "rag.provider",
                    ValidationErrorKind::InvalidValue {
                        expected: "a configured provider id".to_string(),
                        actual: rag.provider.clone(),
                    },
                ));
            }
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new()
    }
}
