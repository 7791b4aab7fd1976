//! Mutable node arena and html5ever import.

use scraper::{ElementRef, Html, Node};

use domlens_protocols::{DocumentError, ElementQuery};

use crate::node::{NodeData, NodeId, NodeKind};

#[derive(Debug, Clone)]
pub(crate) struct Arena {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeKind::Document)],
            root: NodeId(0),
        }
    }

    /// Parse a full document.
    pub fn parse_document(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut arena = Self::new();
        let root = arena.root;
        arena.import_element(root, parsed.root_element());
        arena
    }

    /// Parse `html` as a body fragment and append the nodes under `parent`.
    pub fn append_fragment(&mut self, parent: NodeId, html: &str) {
        let parsed = Html::parse_fragment(html);
        // Fragment content hangs off a synthetic <html> element.
        self.import_children(parent, parsed.root_element());
    }

    fn import_element(&mut self, parent: NodeId, element: ElementRef<'_>) {
        let value = element.value();
        let attributes = value
            .attrs()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        let id = self.append(
            parent,
            NodeKind::Element {
                name: value.name().to_ascii_lowercase(),
                attributes,
            },
        );
        self.import_children(id, element);
    }

    fn import_children(&mut self, parent: NodeId, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.import_element(parent, child_element);
                    }
                }
                Node::Text(text) => {
                    let text: &str = text;
                    self.append(parent, NodeKind::Text(text.to_string()));
                }
                Node::Comment(comment) => {
                    let comment: &str = comment;
                    self.append(parent, NodeKind::Comment(comment.to_string()));
                }
                _ => {}
            }
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Result<&NodeData, DocumentError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| DocumentError::Detached(id.to_string()))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DocumentError> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| DocumentError::Detached(id.to_string()))
    }

    pub fn element(&self, id: NodeId) -> Result<&NodeData, DocumentError> {
        let node = self.node(id)?;
        match node.kind {
            NodeKind::Element { .. } => Ok(node),
            _ => Err(DocumentError::Host(format!("{} is not an element", id))),
        }
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.push(kind);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Whether `id` is reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == self.root {
                return true;
            }
            current = self.nodes.get(cur.0).and_then(|n| n.parent);
        }
        false
    }

    /// Elements below `scope` in document order, `scope` excluded.
    pub fn descendant_elements(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if matches!(node.kind, NodeKind::Element { .. }) {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    pub fn query_all(
        &self,
        scope: Option<NodeId>,
        query: &ElementQuery,
    ) -> Result<Vec<NodeId>, DocumentError> {
        let scope = match scope {
            Some(id) => {
                self.element(id)?;
                id
            }
            None => self.root,
        };
        Ok(self
            .descendant_elements(scope)
            .into_iter()
            .filter(|id| {
                let node = &self.nodes[id.0];
                match &node.kind {
                    NodeKind::Element { name, attributes } => query.matches(name, attributes),
                    _ => false,
                }
            })
            .collect())
    }

    pub fn find_element(&self, tag: &str) -> Option<NodeId> {
        self.descendant_elements(self.root)
            .into_iter()
            .find(|id| self.nodes[id.0].element_name() == Some(tag))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DocumentError> {
        self.element(id)?;
        if let NodeKind::Element { attributes, .. } = &mut self.node_mut(id)?.kind {
            match attributes.iter_mut().find(|(n, _)| n == name) {
                Some(existing) => existing.1 = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DocumentError> {
        self.element(id)?;
        if let NodeKind::Element { attributes, .. } = &mut self.node_mut(id)?.kind {
            attributes.retain(|(n, _)| n != name);
        }
        Ok(())
    }

    pub fn replace_attributes(
        &mut self,
        id: NodeId,
        replacement: &[(String, String)],
    ) -> Result<(), DocumentError> {
        self.element(id)?;
        if let NodeKind::Element { attributes, .. } = &mut self.node_mut(id)?.kind {
            attributes.clear();
            for (name, value) in replacement {
                if !attributes.iter().any(|(n, _)| n == name) {
                    attributes.push((name.clone(), value.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn detach(&mut self, id: NodeId) -> Result<(), DocumentError> {
        let parent = self
            .node(id)?
            .parent
            .ok_or_else(|| DocumentError::Detached(id.to_string()))?;
        self.nodes[parent.0].children.retain(|c| *c != id);
        self.nodes[id.0].parent = None;
        Ok(())
    }

    /// Put a new element where `target` was; `target` ends up detached.
    pub fn replace_with_element(
        &mut self,
        target: NodeId,
        tag: &str,
        attributes: Vec<(String, String)>,
        inner_html: &str,
    ) -> Result<NodeId, DocumentError> {
        self.element(target)?;
        let parent = self
            .node(target)?
            .parent
            .ok_or_else(|| DocumentError::Detached(target.to_string()))?;

        let replacement = self.push(NodeKind::Element {
            name: tag.to_ascii_lowercase(),
            attributes,
        });
        self.append_fragment(replacement, inner_html);

        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == target)
            .ok_or_else(|| DocumentError::Detached(target.to_string()))?;
        self.nodes[parent.0].children[position] = replacement;
        self.nodes[replacement.0].parent = Some(parent);
        self.nodes[target.0].parent = None;
        Ok(replacement)
    }

    pub fn parent_element(&self, id: NodeId) -> Result<Option<NodeId>, DocumentError> {
        let parent = self.node(id)?.parent;
        Ok(parent.filter(|p| matches!(self.nodes[p.0].kind, NodeKind::Element { .. })))
    }

    pub fn child_elements(&self, id: NodeId) -> Result<Vec<NodeId>, DocumentError> {
        Ok(self
            .node(id)?
            .children
            .iter()
            .copied()
            .filter(|c| matches!(self.nodes[c.0].kind, NodeKind::Element { .. }))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_builds_body() {
        let arena = Arena::parse_document("<p>one</p><p>two</p>");
        let body = arena.find_element("body").unwrap();
        assert_eq!(arena.child_elements(body).unwrap().len(), 2);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let arena = Arena::parse_document("<div><span></span><a></a></div><p></p>");
        let body = arena.find_element("body").unwrap();
        let names: Vec<_> = arena
            .descendant_elements(body)
            .into_iter()
            .map(|id| arena.node(id).unwrap().element_name().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["div", "span", "a", "p"]);
    }

    #[test]
    fn test_detach_makes_node_unreachable() {
        let mut arena = Arena::parse_document("<div><span></span></div>");
        let span = arena.find_element("span").unwrap();
        assert!(arena.is_attached(span));
        arena.detach(span).unwrap();
        assert!(!arena.is_attached(span));
        assert!(arena.find_element("span").is_none());
    }

    #[test]
    fn test_replace_attributes_drops_duplicates() {
        let mut arena = Arena::parse_document("<div id=a title=t></div>");
        let div = arena.find_element("div").unwrap();
        arena
            .replace_attributes(
                div,
                &[
                    ("id".to_string(), "b".to_string()),
                    ("id".to_string(), "c".to_string()),
                ],
            )
            .unwrap();
        assert_eq!(
            arena.node(div).unwrap().attributes().unwrap(),
            &[("id".to_string(), "b".to_string())]
        );
    }
}
