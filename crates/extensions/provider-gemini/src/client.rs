//! Gemini API client.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use domlens_protocols::ModelError;

use crate::types::*;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout_seconds: u64,
}

impl GeminiClient {
    /// Create a client with explicit timeouts.
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        connect_timeout_seconds: u64,
        timeout_seconds: u64,
    ) -> Result<Self, ModelError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_seconds))
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ModelError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout_seconds,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate content (non-streaming).
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ModelError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<GeminiError>(&body) {
                Ok(e) => e.error.message,
                Err(_) => body,
            };
            return Err(ModelError::from_api_response(status.as_u16(), message));
        }

        serde_json::from_str(&body)
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    fn transport_error(&self, error: reqwest::Error) -> ModelError {
        if error.is_timeout() {
            ModelError::Timeout(self.timeout_seconds)
        } else {
            ModelError::Network(error.to_string())
        }
    }
}
