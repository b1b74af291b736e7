//! Configuration validation utilities

use super::error::{ValidationError, ValidationErrorKind};
use super::schema::GatewayConfig;
use url::Url;

/// Configuration validator with additional validation rules
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &GatewayConfig) -> Result<(), ValidationError> {
        // First run the built-in validation
        config.validate()?;

        self.validate_credentials(config)?;
        self.validate_base_urls(config)?;
        self.validate_rag(config)?;

        Ok(())
    }

    /// An interpolated key that came out empty is a misconfiguration
    fn validate_credentials(&self, config: &GatewayConfig) -> Result<(), ValidationError> {
        for (index, provider) in config.providers.iter().enumerate() {
            if provider.api_key.is_blank() {
                return Err(ValidationError::required(format!("providers[{}].api_key", index))
                    .with_context(format!("provider '{}' has an empty API key", provider.id)));
            }
        }
        Ok(())
    }

    /// Base URL overrides must be absolute http(s) URLs without a query
    fn validate_base_urls(&self, config: &GatewayConfig) -> Result<(), ValidationError> {
        for (index, provider) in config.providers.iter().enumerate() {
            let Some(base_url) = &provider.base_url else {
                continue;
            };
            let path = format!("providers[{}].base_url", index);

            let url = Url::parse(base_url).map_err(|e| {
                ValidationError::new(
                    path.clone(),
                    ValidationErrorKind::InvalidUrl {
                        message: e.to_string(),
                    },
                )
            })?;

            if !matches!(url.scheme(), "http" | "https") {
                return Err(ValidationError::new(
                    path,
                    ValidationErrorKind::InvalidUrl {
                        message: format!("unsupported scheme '{}'", url.scheme()),
                    },
                ));
            }
            if url.query().is_some() {
                return Err(ValidationError::new(
                    path,
                    ValidationErrorKind::InvalidUrl {
                        message: "base URL must not carry a query string".to_string(),
                    },
                ));
            }
        }
        Ok(())
    }

    fn validate_rag(&self, config: &GatewayConfig) -> Result<(), ValidationError> {
        if let Some(model) = config.rag.as_ref().and_then(|rag| rag.model.as_deref()) {
            if model.trim().is_empty() {
                return Err(ValidationError::required("rag.model")
                    .with_context("omit the field to use the provider's default model"));
            }
        }
        Ok(())
    }
}
