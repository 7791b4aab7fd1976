//! `DocumentHost` implementation over the node arena.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, trace};

use domlens_protocols::{DocumentError, DocumentHost, ElementQuery, NewElement};

use crate::arena::Arena;
use crate::node::NodeId;

const FRAME_TAGS: &[&str] = &["iframe", "frame"];

/// A parsed document that can be queried and mutated like a live page.
pub struct MemoryDocument {
    arena: RwLock<Arena>,
    frame_sources: Arc<HashMap<String, String>>,
}

impl MemoryDocument {
    /// Parse a full HTML document. Parsing never fails; malformed markup is
    /// repaired the way browsers repair it.
    pub fn parse(html: &str) -> Self {
        Self {
            arena: RwLock::new(Arena::parse_document(html)),
            frame_sources: Arc::new(HashMap::new()),
        }
    }

    /// Register the markup served at `src`, making frames that load it
    /// same-origin. Registered sources are visible to nested frames too.
    pub fn with_frame_source(mut self, src: impl Into<String>, html: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.frame_sources).insert(src.into(), html.into());
        self
    }

    fn child_document(&self, html: &str) -> Self {
        Self {
            arena: RwLock::new(Arena::parse_document(html)),
            frame_sources: Arc::clone(&self.frame_sources),
        }
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        let arena = self.arena.read();
        arena.outer_html(arena.root())
    }

    /// Number of elements reachable from the root.
    pub fn element_count(&self) -> usize {
        let arena = self.arena.read();
        arena.descendant_elements(arena.root()).len()
    }

    fn attached(&self, id: NodeId) -> Result<(), DocumentError> {
        if self.arena.read().is_attached(id) {
            Ok(())
        } else {
            Err(DocumentError::Detached(id.to_string()))
        }
    }
}

#[async_trait]
impl DocumentHost for MemoryDocument {
    type Element = NodeId;

    async fn body(&self) -> Result<Option<NodeId>, DocumentError> {
        Ok(self.arena.read().find_element("body"))
    }

    async fn query_all(
        &self,
        scope: Option<&NodeId>,
        query: &ElementQuery,
    ) -> Result<Vec<NodeId>, DocumentError> {
        self.arena.read().query_all(scope.copied(), query)
    }

    async fn tag_name(&self, element: &NodeId) -> Result<String, DocumentError> {
        let arena = self.arena.read();
        let node = arena.element(*element)?;
        Ok(node.element_name().unwrap_or_default().to_string())
    }

    async fn attributes(&self, element: &NodeId) -> Result<Vec<(String, String)>, DocumentError> {
        let arena = self.arena.read();
        let node = arena.element(*element)?;
        Ok(node.attributes().map(<[_]>::to_vec).unwrap_or_default())
    }

    async fn set_attribute(
        &self,
        element: &NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        self.arena.write().set_attribute(*element, name, value)
    }

    async fn remove_attribute(&self, element: &NodeId, name: &str) -> Result<(), DocumentError> {
        self.arena.write().remove_attribute(*element, name)
    }

    async fn replace_attributes(
        &self,
        element: &NodeId,
        attributes: &[(String, String)],
    ) -> Result<(), DocumentError> {
        self.arena.write().replace_attributes(*element, attributes)
    }

    async fn remove(&self, element: &NodeId) -> Result<(), DocumentError> {
        trace!("Removing {}", element);
        self.arena.write().detach(*element)
    }

    async fn parent(&self, element: &NodeId) -> Result<Option<NodeId>, DocumentError> {
        self.arena.read().parent_element(*element)
    }

    async fn children(&self, element: &NodeId) -> Result<Vec<NodeId>, DocumentError> {
        self.arena.read().child_elements(*element)
    }

    async fn inner_html(&self, element: &NodeId) -> Result<String, DocumentError> {
        let arena = self.arena.read();
        arena.element(*element)?;
        Ok(arena.inner_html(*element))
    }

    async fn outer_html(&self, element: &NodeId) -> Result<String, DocumentError> {
        let arena = self.arena.read();
        arena.element(*element)?;
        Ok(arena.outer_html(*element))
    }

    async fn replace_with(
        &self,
        target: &NodeId,
        replacement: NewElement,
    ) -> Result<NodeId, DocumentError> {
        self.attached(*target)?;
        self.arena.write().replace_with_element(
            *target,
            &replacement.tag,
            replacement.attributes,
            &replacement.inner_html,
        )
    }

    async fn frame_document(&self, frame: &NodeId) -> Result<Option<Self>, DocumentError> {
        let (tag, attributes) = {
            let arena = self.arena.read();
            let node = arena.element(*frame)?;
            (
                node.element_name().unwrap_or_default().to_string(),
                node.attributes().map(<[_]>::to_vec).unwrap_or_default(),
            )
        };

        if !FRAME_TAGS.contains(&tag.as_str()) {
            return Err(DocumentError::Host(format!("<{}> is not a frame", tag)));
        }

        let attr = |name: &str| {
            attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        };

        if let Some(srcdoc) = attr("srcdoc") {
            debug!("Frame {} uses srcdoc ({} bytes)", frame, srcdoc.len());
            return Ok(Some(self.child_document(srcdoc)));
        }

        match attr("src").map(str::trim) {
            None | Some("") | Some("about:blank") => Ok(None),
            Some(src) => match self.frame_sources.get(src) {
                Some(html) => {
                    debug!("Frame {} loads registered source {}", frame, src);
                    Ok(Some(self.child_document(html)))
                }
                None => Err(DocumentError::FrameInaccessible(src.to_string())),
            },
        }
    }

    async fn snapshot(&self) -> Result<Self, DocumentError> {
        Ok(Self {
            arena: RwLock::new(self.arena.read().clone()),
            frame_sources: Arc::clone(&self.frame_sources),
        })
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
