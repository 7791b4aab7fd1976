//! Dictionary compaction of stamped markup.
//!
//! Tags are matched as opaque `<...>` substrings. An opening tag's shape is
//! its text without the `address` attribute; a closing tag's shape is its
//! literal text. The compacted text replaces every opening tag with
//! `tN(address)` and every closing tag with `tN`.

mod dictionary;

use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use tracing::{debug, warn};

use domlens_protocols::{ADDRESS_ATTRIBUTE, CodecError, Minifier};

pub use dictionary::{MISSING_TOKEN, TagDictionary, Token};

use crate::minifier::HtmlMinifier;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"\s+{}="([^"]*)""#, regex::escape(ADDRESS_ATTRIBUTE))).unwrap()
});

pub const DICTIONARY_HEADER: &str = "<!-- Tag Dictionary -->";
pub const MARKUP_HEADER: &str = "<!-- Minified HTML -->";

/// Output of one compaction.
#[derive(Debug, Clone, Default)]
pub struct Compaction {
    /// Token stream with text content left in place.
    pub compacted: String,
    pub dictionary: TagDictionary,
    /// Number of tag occurrences replaced.
    pub token_count: usize,
}

impl Compaction {
    /// Nothing to process: no body or no markup.
    pub fn is_empty(&self) -> bool {
        self.compacted.is_empty() && self.dictionary.is_empty()
    }

    pub fn dictionary_text(&self) -> String {
        self.dictionary.to_text()
    }

    /// The dictionary and token stream under their fixed headers.
    pub fn page_structure(&self) -> String {
        format!(
            "{}\n{}\n\n{}\n{}",
            DICTIONARY_HEADER,
            self.dictionary.to_text(),
            MARKUP_HEADER,
            self.compacted
        )
    }
}

/// Minifies stamped markup and replaces tag shapes with dictionary tokens.
#[derive(Clone)]
pub struct DictionaryCodec {
    minifier: Arc<dyn Minifier>,
}

impl Default for DictionaryCodec {
    fn default() -> Self {
        Self::new(Arc::new(HtmlMinifier::new()))
    }
}

impl DictionaryCodec {
    pub fn new(minifier: Arc<dyn Minifier>) -> Self {
        Self { minifier }
    }

    pub fn encode(&self, markup: &str) -> Result<Compaction, CodecError> {
        let minified = self.minifier.minify(markup)?;

        let mut dictionary = TagDictionary::new();
        for tag in TAG.find_iter(&minified) {
            dictionary.intern(&shape_of(tag.as_str()));
        }

        let mut token_count = 0;
        let compacted = TAG.replace_all(&minified, |caps: &Captures<'_>| {
            token_count += 1;
            let tag = &caps[0];
            let Some(token) = dictionary.get(&shape_of(tag)) else {
                warn!("Tag shape missing from dictionary: {}", tag);
                return MISSING_TOKEN.to_string();
            };
            if is_closing(tag) {
                token.to_string()
            } else {
                format!("{}({})", token, address_of(tag).unwrap_or_default())
            }
        });

        let compaction = Compaction {
            compacted: compacted.into_owned(),
            dictionary,
            token_count,
        };
        debug!(
            "Encoded {} bytes of markup into {} bytes with {} shapes",
            minified.len(),
            compaction.compacted.len(),
            compaction.dictionary.len()
        );
        Ok(compaction)
    }
}

fn is_closing(tag: &str) -> bool {
    tag.starts_with("</")
}

fn shape_of(tag: &str) -> String {
    if is_closing(tag) {
        tag.to_string()
    } else {
        ADDRESS.replace(tag, "").into_owned()
    }
}

fn address_of(tag: &str) -> Option<&str> {
    ADDRESS
        .captures(tag)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
