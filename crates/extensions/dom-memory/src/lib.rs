//! In-memory document host for domlens.
//!
//! Parses markup with html5ever (through `scraper`) into a mutable arena and
//! implements [`DocumentHost`](domlens_protocols::DocumentHost) over it, so
//! the compaction pipeline can run without a browser: from the CLI, in tests,
//! or on markup fetched by other means.
//!
//! ## Frames
//!
//! - `<iframe srcdoc="...">` is same-origin and parsed on access.
//! - `<iframe src="...">` is same-origin only when its source was registered
//!   with [`MemoryDocument::with_frame_source`]; any other source behaves like
//!   a cross-origin frame and yields `FrameInaccessible`.
//! - A frame without a source has no content document.

mod arena;
mod document;
mod markdown;
mod node;
mod serialize;

pub use document::MemoryDocument;
pub use markdown::MarkdownRenderer;
pub use node::NodeId;
