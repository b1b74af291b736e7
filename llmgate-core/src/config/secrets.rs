//! Secrets handling and redaction for credentials
//!
//! Credentials flow through the gateway as opaque strings. This module keeps
//! them out of `Debug`/`Display` output and gives the logging code a way to
//! decide which header or field values must never be printed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wrapper type for sensitive strings like API keys
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    /// Create a new secret string
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the actual value (use with caution)
    pub fn expose_secret(&self) -> &str {
        &self.value
    }

    /// Check if the secret is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Field name fragments that mark a value as sensitive
const SENSITIVE_PATTERNS: [&str; 7] = [
    "secret",
    "token",
    "password",
    "credential",
    "auth",
    "private",
    "key",
];

/// Whether a field or header name carries a secret
///
/// Dashes are folded to underscores, so `x-api-key` and `X_API_KEY` match.
pub fn is_sensitive_field(field_name: &str) -> bool {
    let normalized = field_name.to_lowercase().replace('-', "_");
    SENSITIVE_PATTERNS
        .iter()
        .any(|pattern| normalized.contains(pattern))
}

/// Redact a string based on field name patterns
pub fn redact_by_field_name(field_name: &str, value: &str) -> String {
    if is_sensitive_field(field_name) {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}
