//! Provider registry
//!
//! Maps provider ids to adapters. The registry is filled once during start-up
//! and then shared behind an `Arc`; lookups after that need no locking.

use crate::providers::adapter::{ProviderAdapter, ProviderKind};
use crate::providers::error::{ProviderError, ProviderResult};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Registry of provider adapters keyed by provider id
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in provider at its public URL
    pub fn with_defaults() -> Self {
        let adapters = ProviderKind::ALL
            .into_iter()
            .map(|kind| (kind.id().to_string(), kind.create_adapter(None)))
            .collect();
        Self { adapters }
    }

    /// Register an adapter under a provider id
    ///
    /// Fails with `Config` if the id is blank or already taken; an existing
    /// registration is never overwritten.
    pub fn register(
        &mut self,
        provider_id: impl Into<String>,
        adapter: Arc<dyn ProviderAdapter>,
    ) -> ProviderResult<()> {
        let provider_id = provider_id.into();

        if provider_id.trim().is_empty() {
            return Err(ProviderError::Config(
                "provider id must not be blank".to_string(),
            ));
        }
        if self.adapters.contains_key(&provider_id) {
            return Err(ProviderError::Config(format!(
                "provider '{}' is already registered",
                provider_id
            )));
        }

        self.adapters.insert(provider_id, adapter);
        Ok(())
    }

    /// Find the adapter for a provider id
    pub fn lookup(&self, provider_id: &str) -> ProviderResult<&dyn ProviderAdapter> {
        self.adapters
            .get(provider_id)
            .map(|adapter| adapter.as_ref())
            .ok_or_else(|| ProviderError::UnsupportedProvider(provider_id.to_string()))
    }

    /// Whether a provider id is registered
    pub fn contains(&self, provider_id: &str) -> bool {
        self.adapters.contains_key(provider_id)
    }

    /// Registered provider ids in sorted order
    pub fn provider_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.adapters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.provider_ids())
            .finish()
    }
}
