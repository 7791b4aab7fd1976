//! Inlining of same-origin frame documents.

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use tracing::{debug, warn};

use domlens_protocols::{
    DocumentError, DocumentHost, ElementQuery, FRAME_MARKER_ATTRIBUTE, NewElement,
};

use crate::sanitizer::Sanitizer;

/// Tags whose content document gets inlined.
pub const FRAME_TAGS: &[&str] = &["iframe", "frame"];

/// Deepest frame nesting that gets inlined; deeper frames are skipped.
pub const MAX_FRAME_DEPTH: usize = 10;

/// Source a `srcdoc` frame is loaded from.
const SRCDOC_SOURCE: &str = "about:srcdoc";

/// Frames seen by one flattening call, nested levels included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenReport {
    /// Frames replaced by a marker container.
    pub inlined: usize,
    /// Frames left in place: inaccessible or without a content document.
    pub skipped: usize,
}

impl FlattenReport {
    fn absorb(&mut self, other: FlattenReport) {
        self.inlined += other.inlined;
        self.skipped += other.skipped;
    }
}

pub struct FrameFlattener;

impl FrameFlattener {
    /// Flatten `host` itself. Used before stamping, so the live page ends
    /// up carrying the inlined content.
    pub async fn flatten_in_place<H: DocumentHost>(host: &H) -> Result<FlattenReport, DocumentError> {
        flatten_document(host, Vec::new()).await
    }

    /// Flatten a snapshot of `host` and return it; `host` is untouched.
    pub async fn flatten_snapshot<H: DocumentHost>(host: &H) -> Result<H, DocumentError> {
        let copy = host.snapshot().await?;
        flatten_document(&copy, Vec::new()).await?;
        Ok(copy)
    }
}

/// `ancestors` holds the sources of the frames `host` is nested in,
/// outermost first.
fn flatten_document<H: DocumentHost>(
    host: &H,
    ancestors: Vec<String>,
) -> BoxFuture<'_, Result<FlattenReport, DocumentError>> {
    async move {
        let mut report = FlattenReport::default();
        let frames = host
            .query_all(None, &ElementQuery::tags(FRAME_TAGS.iter().copied()))
            .await?;
        if frames.is_empty() {
            return Ok(report);
        }

        // Frame reads run together; splicing happens afterwards in document order.
        let contents = join_all(frames.iter().map(|frame| read_frame(host, frame, &ancestors))).await;

        for (frame, content) in frames.iter().zip(contents) {
            match content {
                Ok(Some((markup, nested))) => {
                    let container = NewElement::new("div")
                        .with_attribute(FRAME_MARKER_ATTRIBUTE, "true")
                        .with_inner_html(markup);
                    host.replace_with(frame, container).await?;
                    report.inlined += 1;
                    report.absorb(nested);
                }
                Ok(None) => {
                    debug!("Frame {:?} has no content document", frame);
                    report.skipped += 1;
                }
                Err(e) => {
                    warn!("Skipping frame {:?}: {}", frame, e);
                    report.skipped += 1;
                }
            }
        }

        debug!(
            "Flattened frames: {} inlined, {} skipped",
            report.inlined, report.skipped
        );
        Ok(report)
    }
    .boxed()
}

/// Body markup of a frame's document, with its own frames already inlined.
async fn read_frame<H: DocumentHost>(
    host: &H,
    frame: &H::Element,
    ancestors: &[String],
) -> Result<Option<(String, FlattenReport)>, DocumentError> {
    if ancestors.len() >= MAX_FRAME_DEPTH {
        return Err(DocumentError::FrameTooDeep(MAX_FRAME_DEPTH));
    }
    let source = frame_source(host, frame).await?;
    if is_cyclable(&source) && ancestors.contains(&source) {
        return Err(DocumentError::FrameCycle(source));
    }

    let Some(inner) = host.frame_document(frame).await? else {
        return Ok(None);
    };
    inner.wait_ready().await?;

    let mut chain = ancestors.to_vec();
    chain.push(source);
    let nested = flatten_document(&inner, chain).await?;
    Sanitizer::sanitize(&inner, None).await?;

    let markup = match inner.body().await? {
        Some(body) => inner.inner_html(&body).await?,
        None => String::new(),
    };
    Ok(Some((markup, nested)))
}

/// Where a frame's document comes from; `srcdoc` wins over `src`.
async fn frame_source<H: DocumentHost>(host: &H, frame: &H::Element) -> Result<String, DocumentError> {
    let attributes = host.attributes(frame).await?;
    let attr = |name: &str| attributes.iter().find(|(n, _)| n == name).map(|(_, v)| v.trim());
    Ok(match (attr("srcdoc"), attr("src")) {
        (Some(_), _) => SRCDOC_SOURCE.to_string(),
        (None, Some(src)) => src.to_string(),
        (None, None) => String::new(),
    })
}

/// Inline documents and blank frames cannot load their ancestors.
fn is_cyclable(source: &str) -> bool {
    !matches!(source, "" | "about:blank" | SRCDOC_SOURCE)
}

#[cfg(test)]
#[path = "flattener_tests.rs"]
mod tests;
