//! Query model trait definition.

use async_trait::async_trait;

use crate::error::ModelError;

/// A language model that answers a single prompt with free text.
///
/// The pipeline never holds a global model; every [`QueryModel`] is passed
/// explicitly to whichever component issues the call.
#[async_trait]
pub trait QueryModel: Send + Sync {
    /// Returns the model identifier used for logging.
    fn id(&self) -> &str;

    /// Send one prompt and return the model's text answer.
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}
