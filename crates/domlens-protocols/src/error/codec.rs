//! Markup transformation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Minification failed: {0}")]
    Minify(String),

    #[error("Markdown conversion failed: {0}")]
    Markdown(String),
}
