//! Markup transformation traits.

use crate::error::CodecError;

/// Collapses whitespace and strips comments from markup.
pub trait Minifier: Send + Sync {
    fn minify(&self, markup: &str) -> Result<String, CodecError>;
}

/// Converts sanitized markup into Markdown text.
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, markup: &str) -> Result<String, CodecError>;
}
