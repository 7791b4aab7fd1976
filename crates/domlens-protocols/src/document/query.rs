//! Typed element queries.

use serde::{Deserialize, Serialize};

/// The element selections the pipeline needs from a host.
///
/// Hosts backed by a real browser translate these with [`ElementQuery::to_css`];
/// in-memory hosts match them directly with [`ElementQuery::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementQuery {
    /// Every element.
    All,
    /// Elements whose tag name is one of the given names.
    Tags(Vec<String>),
    /// Elements carrying `name="value"` exactly.
    AttributeEquals { name: String, value: String },
    /// Elements whose attribute `name` starts with `prefix`.
    AttributePrefix { name: String, prefix: String },
}

impl ElementQuery {
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ElementQuery::Tags(tags.into_iter().map(Into::into).collect())
    }

    pub fn attribute_equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        ElementQuery::AttributeEquals {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn attribute_prefix(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        ElementQuery::AttributePrefix {
            name: name.into(),
            prefix: prefix.into(),
        }
    }

    /// Check an element, given its lowercase tag name and attributes.
    pub fn matches(&self, tag: &str, attributes: &[(String, String)]) -> bool {
        let attr = |name: &str| {
            attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        };

        match self {
            ElementQuery::All => true,
            ElementQuery::Tags(tags) => tags.iter().any(|t| t.eq_ignore_ascii_case(tag)),
            ElementQuery::AttributeEquals { name, value } => attr(name) == Some(value.as_str()),
            ElementQuery::AttributePrefix { name, prefix } => {
                attr(name).is_some_and(|v| v.starts_with(prefix.as_str()))
            }
        }
    }

    /// Render as a CSS selector.
    pub fn to_css(&self) -> String {
        match self {
            ElementQuery::All => "*".to_string(),
            ElementQuery::Tags(tags) => tags.join(", "),
            ElementQuery::AttributeEquals { name, value } => {
                format!("[{}=\"{}\"]", name, escape_css_string(value))
            }
            ElementQuery::AttributePrefix { name, prefix } => {
                format!("[{}^=\"{}\"]", name, escape_css_string(prefix))
            }
        }
    }
}

fn escape_css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
