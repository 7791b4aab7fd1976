//! Document host trait definition.

use std::fmt::Debug;
use std::hash::Hash;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ElementQuery;
use crate::error::DocumentError;

/// An element to create in place of an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub inner_html: String,
}

impl NewElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_inner_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = html.into();
        self
    }
}

/// A live document tree owned by the host environment.
///
/// Every call may suspend while the host runs in-page code. The pipeline
/// holds exclusive write access for the duration of one query; callers must
/// serialize queries against the same document.
#[async_trait]
pub trait DocumentHost: Send + Sync + Sized {
    /// Handle to one element of this document.
    type Element: Clone + Eq + Hash + Debug + Send + Sync;

    /// The `body` element, if the document has one.
    async fn body(&self) -> Result<Option<Self::Element>, DocumentError>;

    /// Descendants of `scope` (the whole document when `None`) matching
    /// `query`, in document order. `scope` itself is never included.
    async fn query_all(
        &self,
        scope: Option<&Self::Element>,
        query: &ElementQuery,
    ) -> Result<Vec<Self::Element>, DocumentError>;

    /// First element of the whole document matching `query`.
    async fn query_first(
        &self,
        query: &ElementQuery,
    ) -> Result<Option<Self::Element>, DocumentError> {
        Ok(self.query_all(None, query).await?.into_iter().next())
    }

    /// Lowercase tag name.
    async fn tag_name(&self, element: &Self::Element) -> Result<String, DocumentError>;

    /// Attributes in source order.
    async fn attributes(
        &self,
        element: &Self::Element,
    ) -> Result<Vec<(String, String)>, DocumentError>;

    async fn set_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError>;

    async fn remove_attribute(&self, element: &Self::Element, name: &str)
    -> Result<(), DocumentError>;

    /// Drop every attribute and set `attributes` in order.
    async fn replace_attributes(
        &self,
        element: &Self::Element,
        attributes: &[(String, String)],
    ) -> Result<(), DocumentError> {
        for (name, _) in self.attributes(element).await? {
            self.remove_attribute(element, &name).await?;
        }
        for (name, value) in attributes {
            self.set_attribute(element, name, value).await?;
        }
        Ok(())
    }

    /// Detach the element and its subtree.
    async fn remove(&self, element: &Self::Element) -> Result<(), DocumentError>;

    /// Parent element, `None` at the root element.
    async fn parent(&self, element: &Self::Element)
    -> Result<Option<Self::Element>, DocumentError>;

    /// Element children in order.
    async fn children(&self, element: &Self::Element) -> Result<Vec<Self::Element>, DocumentError>;

    async fn inner_html(&self, element: &Self::Element) -> Result<String, DocumentError>;

    async fn outer_html(&self, element: &Self::Element) -> Result<String, DocumentError>;

    /// Replace `target` with a newly created element and return its handle.
    async fn replace_with(
        &self,
        target: &Self::Element,
        replacement: NewElement,
    ) -> Result<Self::Element, DocumentError>;

    /// The content document of a frame element.
    ///
    /// `Ok(None)` when the frame has no content document; an error such as
    /// [`DocumentError::FrameInaccessible`] when it cannot be read.
    async fn frame_document(&self, frame: &Self::Element) -> Result<Option<Self>, DocumentError>;

    /// Resolves once the document's content has been parsed.
    async fn wait_ready(&self) -> Result<(), DocumentError> {
        Ok(())
    }

    /// A detached deep copy that can be mutated without touching this document.
    async fn snapshot(&self) -> Result<Self, DocumentError>;
}
