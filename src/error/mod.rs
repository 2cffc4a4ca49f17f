//! Error types for respkit.

use thiserror::Error;

/// Primary error type for all respkit operations.
#[derive(Error, Debug)]
pub enum RespkitError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Response body as reported by the service (`Value::String` when not JSON).
        payload: serde_json::Value,
    },

    /// The service reported a failure in the middle of a streamed response.
    #[error("Stream error: {message}")]
    Stream {
        message: String,
        payload: serde_json::Value,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Coarse classification of a [`RespkitError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Authentication,
    RateLimit,
    Network,
    Server,
    Service,
    Serialization,
    InvalidArgument,
}

impl RespkitError {
    /// Create an API error from a status code and raw body.
    pub fn api(status: u16, message: impl Into<String>, payload: serde_json::Value) -> Self {
        Self::Api {
            status,
            message: message.into(),
            payload,
        }
    }

    /// Create a mid-stream service error, keeping the payload verbatim.
    pub fn stream(payload: serde_json::Value) -> Self {
        let message = payload
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| payload.to_string());
        Self::Stream { message, payload }
    }

    /// Service-supplied payload, if this error carries one.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Api { payload, .. } | Self::Stream { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) => ErrorCategory::Network,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::InvalidArgument(_) => ErrorCategory::InvalidArgument,
            Self::Stream { .. } => ErrorCategory::Service,
            Self::Api { status, .. } => match status {
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Service,
            },
        }
    }

    /// Whether a caller-side retry could plausibly succeed.
    ///
    /// respkit never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RespkitError>;
