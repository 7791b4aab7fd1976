//! # domlens Provider - Gemini
//!
//! Google Gemini `generateContent` as a [`QueryModel`](domlens_protocols::QueryModel).

mod client;
mod model;
mod types;

pub use client::{DEFAULT_BASE_URL, GeminiClient};
pub use model::GeminiModel;
pub use types::*;
