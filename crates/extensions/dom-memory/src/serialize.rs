//! HTML serialization of arena subtrees.

use crate::arena::Arena;
use crate::node::{NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

impl Arena {
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, false, &mut out);
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        let raw = self.node(id).ok().and_then(|n| n.element_name()).is_some_and(is_raw_text);
        if let Ok(node) = self.node(id) {
            for child in &node.children {
                self.write_node(*child, raw, &mut out);
            }
        }
        out
    }

    fn write_node(&self, id: NodeId, raw_parent: bool, out: &mut String) {
        let Ok(node) = self.node(id) else {
            return;
        };

        match &node.kind {
            NodeKind::Document => {
                for child in &node.children {
                    self.write_node(*child, false, out);
                }
            }
            NodeKind::Element { name, attributes } => {
                out.push('<');
                out.push_str(name);
                for (attr, value) in attributes {
                    out.push(' ');
                    out.push_str(attr);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&name.as_str()) {
                    return;
                }

                let raw = is_raw_text(name);
                for child in &node.children {
                    self.write_node(*child, raw, out);
                }

                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
            NodeKind::Text(text) => {
                if raw_parent {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            NodeKind::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
        }
    }
}

fn is_raw_text(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_simple_markup() {
        let arena = Arena::parse_document("<div class=\"x\"><span>A &amp; B</span></div>");
        let body = arena.find_element("body").unwrap();
        assert_eq!(
            arena.inner_html(body),
            "<div class=\"x\"><span>A &amp; B</span></div>"
        );
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let arena = Arena::parse_document("<p>a<br>b<img src=\"i.png\"></p>");
        let body = arena.find_element("body").unwrap();
        assert_eq!(arena.inner_html(body), "<p>a<br>b<img src=\"i.png\"></p>");
    }

    #[test]
    fn test_script_text_is_not_escaped() {
        let arena = Arena::parse_document("<script>if (a < b) {}</script>");
        let script = arena.find_element("script").unwrap();
        assert_eq!(arena.inner_html(script), "if (a < b) {}");
    }

    #[test]
    fn test_attribute_quotes_escaped() {
        let arena = Arena::parse_document("<a title='say \"hi\"'>x</a>");
        let a = arena.find_element("a").unwrap();
        assert_eq!(arena.outer_html(a), "<a title=\"say &quot;hi&quot;\">x</a>");
    }

    #[test]
    fn test_attribute_angle_brackets_escaped() {
        let arena = Arena::parse_document("<div class=\"[&>svg]:w-4\" title=\"a<b\"></div>");
        let div = arena.find_element("div").unwrap();
        assert_eq!(
            arena.outer_html(div),
            "<div class=\"[&amp;&gt;svg]:w-4\" title=\"a&lt;b\"></div>"
        );
    }

    #[test]
    fn test_comments_preserved() {
        let arena = Arena::parse_document("<div><!-- note --></div>");
        let div = arena.find_element("div").unwrap();
        assert_eq!(arena.outer_html(div), "<div><!-- note --></div>");
    }
}
