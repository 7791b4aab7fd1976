//! JSON extraction from model output.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::QueryError;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(\{.*?\}|\[.*?\])\s*```").unwrap());
static ANY_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[A-Za-z0-9_-]*\s*(\{.*?\}|\[.*?\])\s*```").unwrap());

/// Pull a JSON value out of free text.
///
/// Tries a ```` ```json ```` fence, then any fence, then the whole text.
pub fn extract_json(text: &str) -> Result<Value, QueryError> {
    for pattern in [&*JSON_FENCE, &*ANY_FENCE] {
        for caps in pattern.captures_iter(text) {
            if let Ok(value) = serde_json::from_str(&caps[1]) {
                return Ok(value);
            }
        }
    }

    serde_json::from_str(text.trim()).map_err(|_| QueryError::JsonExtraction(preview(text)))
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 200;
    match text.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
