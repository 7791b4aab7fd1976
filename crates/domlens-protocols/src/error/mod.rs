//! Error types for the domlens protocol layer.

mod codec;
mod document;
mod model;

pub use codec::*;
pub use document::*;
pub use model::*;
