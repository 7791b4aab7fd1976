//! Removal of non-content nodes and inline binary links.

use std::collections::HashSet;

use tracing::debug;

use domlens_protocols::{DocumentError, DocumentHost, ElementQuery};

/// Subtrees removed by [`Sanitizer::sanitize`].
pub const STRIPPED_TAGS: &[&str] = &["script", "style", "svg"];

/// Scheme prefix of inline binary links.
pub const DATA_SCHEME: &str = "data:";

/// What one sanitizing pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub removed_elements: usize,
    pub neutralized_links: usize,
}

impl SanitizeReport {
    pub fn is_noop(&self) -> bool {
        self.removed_elements == 0 && self.neutralized_links == 0
    }
}

pub struct Sanitizer;

impl Sanitizer {
    /// Strip script, style and svg subtrees and drop `href` values that
    /// start with `data:`. `scope` limits the pass to the scope's
    /// descendants; `None` covers the whole document.
    ///
    /// Running the pass twice is a no-op the second time.
    pub async fn sanitize<H: DocumentHost>(
        host: &H,
        scope: Option<&H::Element>,
    ) -> Result<SanitizeReport, DocumentError> {
        let mut report = SanitizeReport::default();

        let doomed = host
            .query_all(scope, &ElementQuery::tags(STRIPPED_TAGS.iter().copied()))
            .await?;
        let mut removed: HashSet<H::Element> = HashSet::with_capacity(doomed.len());
        for element in doomed {
            // Nested matches leave with their removed ancestor.
            if has_removed_ancestor(host, &element, &removed).await? {
                continue;
            }
            host.remove(&element).await?;
            removed.insert(element);
            report.removed_elements += 1;
        }

        let links = host
            .query_all(scope, &ElementQuery::attribute_prefix("href", DATA_SCHEME))
            .await?;
        for link in links {
            host.remove_attribute(&link, "href").await?;
            report.neutralized_links += 1;
        }

        if !report.is_noop() {
            debug!(
                "Sanitized {} subtrees and {} data links",
                report.removed_elements, report.neutralized_links
            );
        }
        Ok(report)
    }
}

async fn has_removed_ancestor<H: DocumentHost>(
    host: &H,
    element: &H::Element,
    removed: &HashSet<H::Element>,
) -> Result<bool, DocumentError> {
    if removed.is_empty() {
        return Ok(false);
    }
    let mut current = host.parent(element).await?;
    while let Some(parent) = current {
        if removed.contains(&parent) {
            return Ok(true);
        }
        current = host.parent(&parent).await?;
    }
    Ok(false)
}

#[cfg(test)]
#[path = "sanitizer_tests.rs"]
mod tests;
