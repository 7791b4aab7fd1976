//! Markdown extraction from a snapshot of the page.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use domlens_protocols::{DocumentHost, MarkdownConverter};

use crate::error::QueryError;
use crate::flattener::FrameFlattener;
use crate::sanitizer::Sanitizer;

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownOptions {
    /// Collapse runs of newlines to one.
    pub collapse_newlines: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            collapse_newlines: true,
        }
    }
}

/// Converts a page to Markdown without touching the live document.
#[derive(Clone)]
pub struct MarkdownExtractor {
    converter: Arc<dyn MarkdownConverter>,
    options: MarkdownOptions,
}

impl MarkdownExtractor {
    pub fn new(converter: Arc<dyn MarkdownConverter>) -> Self {
        Self {
            converter,
            options: MarkdownOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MarkdownOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn extract<H: DocumentHost>(&self, host: &H) -> Result<String, QueryError> {
        let copy = FrameFlattener::flatten_snapshot(host).await?;
        Sanitizer::sanitize(&copy, None).await?;

        let Some(body) = copy.body().await? else {
            debug!("Snapshot has no body, returning empty markdown");
            return Ok(String::new());
        };
        let markup = copy.outer_html(&body).await?;
        let markdown = self.converter.convert(&markup)?;

        Ok(if self.options.collapse_newlines {
            BLANK_LINES.replace_all(&markdown, "\n").into_owned()
        } else {
            markdown
        })
    }
}

/// Markdown for `host` with default options.
pub async fn extract_markdown<H: DocumentHost>(
    host: &H,
    converter: Arc<dyn MarkdownConverter>,
) -> Result<String, QueryError> {
    MarkdownExtractor::new(converter).extract(host).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use domlens_dom_memory::{MarkdownRenderer, MemoryDocument};

    #[tokio::test]
    async fn test_extract_collapses_blank_lines() {
        let doc = MemoryDocument::parse("<h1>Shop</h1><p>Tea <b>4.50</b></p><script>track()</script>");
        let markdown = extract_markdown(&doc, Arc::new(MarkdownRenderer::new()))
            .await
            .unwrap();
        assert_eq!(markdown, "# Shop\nTea **4.50**");
    }

    #[tokio::test]
    async fn test_extract_keeps_blank_lines_when_asked() {
        let doc = MemoryDocument::parse("<h1>Shop</h1><p>Tea</p>");
        let markdown = MarkdownExtractor::new(Arc::new(MarkdownRenderer::new()))
            .with_options(MarkdownOptions {
                collapse_newlines: false,
            })
            .extract(&doc)
            .await
            .unwrap();
        assert_eq!(markdown, "# Shop\n\nTea");
    }

    #[tokio::test]
    async fn test_extract_includes_frames_and_leaves_page_alone() {
        let doc = MemoryDocument::parse("<p>outer</p><iframe srcdoc=\"<p>framed</p>\"></iframe>");
        let before = doc.to_html();
        let markdown = extract_markdown(&doc, Arc::new(MarkdownRenderer::new()))
            .await
            .unwrap();
        assert_eq!(markdown, "outer\nframed");
        assert_eq!(doc.to_html(), before);
    }
}
