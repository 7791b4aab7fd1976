//! Structural paths for found elements.

use domlens_protocols::{DocumentError, DocumentHost};

/// One element sibling, as seen from its parent.
struct Sibling<E> {
    element: E,
    tag: String,
    classes: Vec<String>,
}

pub struct PathDeriver;

impl PathDeriver {
    /// A CSS selector path in the style of browser devtools:
    /// `html > body > div:nth-child(2) > a.button`. The walk stops at the
    /// first ancestor with an id.
    pub async fn css_path<H: DocumentHost>(
        host: &H,
        element: &H::Element,
    ) -> Result<String, DocumentError> {
        let mut steps = Vec::new();
        let mut current = Some(element.clone());

        while let Some(node) = current {
            let tag = host.tag_name(&node).await?;
            let attributes = host.attributes(&node).await?;
            if let Some(id) = attribute(&attributes, "id").filter(|id| !id.is_empty()) {
                steps.push(format!("{}#{}", tag, escape_identifier(id)));
                break;
            }

            let parent = host.parent(&node).await?;
            let step = match &parent {
                None => tag,
                Some(parent) => {
                    let siblings = siblings(host, parent).await?;
                    css_step(&node, &tag, &attributes, &siblings)
                }
            };
            steps.push(step);
            current = parent;
        }

        steps.reverse();
        Ok(steps.join(" > "))
    }

    /// An XPath from the root element down, or from the nearest ancestor
    /// with an id: `//*[@id="main"]/ul/li[3]`.
    pub async fn xpath<H: DocumentHost>(
        host: &H,
        element: &H::Element,
    ) -> Result<String, DocumentError> {
        let mut steps = Vec::new();
        let mut current = Some(element.clone());

        while let Some(node) = current {
            let tag = host.tag_name(&node).await?;
            let attributes = host.attributes(&node).await?;
            if let Some(id) = attribute(&attributes, "id").filter(|id| !id.is_empty()) {
                steps.push(format!("//*[@id={}]", xpath_literal(id)));
                break;
            }

            let parent = host.parent(&node).await?;
            let step = match &parent {
                None => format!("/{}", tag),
                Some(parent) => {
                    let siblings = siblings(host, parent).await?;
                    let same_tag: Vec<_> = siblings.iter().filter(|s| s.tag == tag).collect();
                    match same_tag.iter().position(|s| s.element == node) {
                        Some(index) if same_tag.len() > 1 => format!("/{}[{}]", tag, index + 1),
                        _ => format!("/{}", tag),
                    }
                }
            };
            steps.push(step);
            current = parent;
        }

        steps.reverse();
        Ok(steps.concat())
    }
}

async fn siblings<H: DocumentHost>(
    host: &H,
    parent: &H::Element,
) -> Result<Vec<Sibling<H::Element>>, DocumentError> {
    let children = host.children(parent).await?;
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        let tag = host.tag_name(&child).await?;
        let attributes = host.attributes(&child).await?;
        out.push(Sibling {
            classes: classes(&attributes),
            element: child,
            tag,
        });
    }
    Ok(out)
}

fn css_step<E: PartialEq>(
    node: &E,
    tag: &str,
    attributes: &[(String, String)],
    siblings: &[Sibling<E>],
) -> String {
    let same_tag: Vec<_> = siblings.iter().filter(|s| s.tag == tag).collect();
    if same_tag.len() <= 1 {
        return tag.to_string();
    }

    let own = classes(attributes);
    if !own.is_empty() {
        let shared = same_tag
            .iter()
            .filter(|s| s.element != *node)
            .any(|s| own.iter().all(|c| s.classes.contains(c)));
        if !shared {
            let selector: String = own.iter().map(|c| format!(".{}", escape_identifier(c))).collect();
            return format!("{}{}", tag, selector);
        }
    }

    let position = siblings
        .iter()
        .position(|s| s.element == *node)
        .map_or(1, |i| i + 1);
    format!("{}:nth-child({})", tag, position)
}

fn attribute<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

fn classes(attributes: &[(String, String)]) -> Vec<String> {
    attribute(attributes, "class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Escape a CSS identifier (id or class name).
fn escape_identifier(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (i, c) in ident.chars().enumerate() {
        if c.is_ascii_digit() && i == 0 {
            out.push_str(&format!("\\{:x} ", c as u32));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

/// Quote a string for XPath, using `concat()` when it holds both quote kinds.
fn xpath_literal(value: &str) -> String {
    if !value.contains('"') {
        format!("\"{}\"", value)
    } else if !value.contains('\'') {
        format!("'{}'", value)
    } else {
        let parts: Vec<String> = value.split('"').map(|p| format!("\"{}\"", p)).collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
