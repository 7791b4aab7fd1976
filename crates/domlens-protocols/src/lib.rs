//! # domlens Protocols
//!
//! Interface definitions for the collaborators the compaction pipeline talks to.
//! Contains only traits, value types and errors - no implementations.
//!
//! ## Core Traits
//!
//! - [`DocumentHost`] - A live, mutable document tree supplied by the host environment
//! - [`QueryModel`] - An LLM that answers a prompt with text
//! - [`Minifier`] - Whitespace/comment minification of markup
//! - [`MarkdownConverter`] - Markup to Markdown conversion

pub mod codec;
pub mod document;
pub mod error;
pub mod model;

pub use codec::{MarkdownConverter, Minifier};
pub use document::{DocumentHost, ElementQuery, NewElement, ADDRESS_ATTRIBUTE, FRAME_MARKER_ATTRIBUTE};
pub use error::{CodecError, DocumentError, ModelError};
pub use model::QueryModel;
