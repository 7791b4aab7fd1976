//! # domlens core
//!
//! Turns a live document into a compact, addressable text form for an LLM
//! and turns the LLM's answer back into document locations.
//!
//! ## Pipeline
//!
//! - [`FrameFlattener`] - inlines same-origin frame documents
//! - [`Sanitizer`] - drops script/style/svg and inline binary links
//! - [`IdentityStamper`] - stamps a unique `address` on every element
//! - [`DictionaryCodec`] - replaces tag shapes with dictionary tokens
//! - [`AddressResolver`] - maps address structures back to elements or paths
//!
//! [`PageQuery`] wires the pipeline to a [`QueryModel`](domlens_protocols::QueryModel).

pub mod address;
pub mod codec;
pub mod compactor;
pub mod error;
pub mod flattener;
pub mod json;
pub mod markdown;
pub mod minifier;
pub mod page_query;
pub mod prompts;
pub mod resolver;
pub mod sanitizer;
pub mod stamper;

pub use address::AddressGenerator;
pub use codec::{Compaction, DictionaryCodec, TagDictionary, Token};
pub use compactor::{Compactor, compact_page};
pub use error::QueryError;
pub use flattener::{FlattenReport, FrameFlattener, MAX_FRAME_DEPTH};
pub use json::extract_json;
pub use markdown::{MarkdownExtractor, MarkdownOptions, extract_markdown};
pub use minifier::HtmlMinifier;
pub use page_query::PageQuery;
pub use resolver::{AddressQuery, AddressResolver, PathDeriver, ResolutionMode, Resolved};
pub use sanitizer::{SanitizeReport, Sanitizer};
pub use stamper::{IdentityStamper, StampingOptions};
