//! Gemini as a query model.

use async_trait::async_trait;
use tracing::{debug, warn};

use domlens_config::ModelConfig;
use domlens_protocols::{ModelError, QueryModel};

use crate::client::GeminiClient;
use crate::types::*;

/// Gemini model answering single-turn prompts.
pub struct GeminiModel {
    client: GeminiClient,
    model: String,
    generation: GenerationConfig,
}

impl GeminiModel {
    /// Build from the `[model]` config section. Fails without an API key.
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ModelError::NotConfigured("model.api_key is not set".to_string()))?;

        let client = GeminiClient::new(
            api_key,
            config.base_url.clone(),
            config.connect_timeout_seconds,
            config.timeout_seconds,
        )?;

        Ok(Self {
            client,
            model: config.model.clone(),
            generation: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
                response_mime_type: None,
            },
        })
    }

    /// Model with default settings against `base_url`.
    pub fn with_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, ModelError> {
        let config = ModelConfig {
            api_key: Some(api_key.into()),
            base_url: Some(base_url.into()),
            ..Default::default()
        };
        Self::from_config(&config)
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            generation_config: self.generation.clone().into_option(),
        }
    }
}

#[async_trait]
impl QueryModel for GeminiModel {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let response = self
            .client
            .generate_content(&self.model, &self.build_request(prompt))
            .await?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(ModelError::ContentFiltered(format!("prompt blocked: {}", reason)));
        }

        let candidate = response
            .candidates
            .first()
            .ok_or_else(|| ModelError::InvalidResponse("no candidates".to_string()))?;

        let text = candidate
            .content
            .as_ref()
            .map(Content::text)
            .unwrap_or_default();

        if text.is_empty() {
            return match candidate.finish_reason.as_deref() {
                Some("SAFETY") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                    Err(ModelError::ContentFiltered(format!(
                        "candidate finished with {}",
                        candidate.finish_reason.as_deref().unwrap_or_default()
                    )))
                }
                _ => Err(ModelError::InvalidResponse("candidate has no text".to_string())),
            };
        }

        if candidate.finish_reason.as_deref() == Some("MAX_TOKENS") {
            warn!("Gemini answer truncated at max_output_tokens");
        }
        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Gemini usage: prompt={} completion={} total={}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }
        Ok(text)
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
