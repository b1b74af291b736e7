//! Provider error types and handling

use thiserror::Error;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur when dispatching a request to an LLM provider
///
/// Each call ends in exactly one of these or a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider id is not registered; raised before any network I/O
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Missing credential or malformed registration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network failure, timeout or connection refusal
    #[error("Transport error: {message}")]
    Transport { message: String, timed_out: bool },

    /// The vendor answered with a non-success status
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Success status but the body lacks the expected fields
    #[error("Failed to parse response: {reason}")]
    Parse { reason: String },
}

impl ProviderError {
    /// Shorthand for a parse failure
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    /// Whether the transport gave up because the deadline passed
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { timed_out: true, .. })
    }

    /// The upstream HTTP status, if the vendor answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        let timed_out = err.is_timeout();
        let connect = err.is_connect();
        // The URL may carry a credential as a query parameter.
        let err = err.without_url();

        let message = if connect {
            format!("Connection failed: {}", err)
        } else if timed_out {
            format!("Request timed out: {}", err)
        } else {
            err.to_string()
        };

        ProviderError::Transport { message, timed_out }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::parse(err.to_string())
    }
}
