//! Query model (LLM) errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model is not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}

impl ModelError {
    /// Classify a non-success HTTP response from a model API.
    pub fn from_api_response(status: u16, message: String) -> Self {
        let lower = message.to_lowercase();
        match status {
            401 | 403 => ModelError::AuthenticationFailed(message),
            429 => ModelError::RateLimited {
                retry_after_seconds: 60,
            },
            _ if lower.contains("safety") || lower.contains("blocked") || lower.contains("filter") => {
                ModelError::ContentFiltered(message)
            }
            _ => ModelError::ApiError { status, message },
        }
    }

    /// Whether the same request may succeed if sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ModelError::RateLimited { .. } | ModelError::Network(_) | ModelError::Timeout(_)
        )
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
