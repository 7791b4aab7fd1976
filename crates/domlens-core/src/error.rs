//! Errors surfaced by the query pipeline.

use thiserror::Error;

use domlens_protocols::{CodecError, DocumentError, ModelError};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("No JSON found in model output: {0}")]
    JsonExtraction(String),
}
