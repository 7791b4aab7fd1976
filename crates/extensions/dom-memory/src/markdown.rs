//! Best-effort HTML to Markdown conversion.

use scraper::{ElementRef, Html, Node};

use domlens_protocols::{CodecError, MarkdownConverter};

const SKIPPED: &[&str] = &[
    "head", "script", "style", "noscript", "template", "svg", "title", "meta", "link",
];

const BLOCKS: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "main", "nav", "aside", "form",
    "table", "tbody", "thead", "tfoot", "tr", "figure", "figcaption", "fieldset", "address",
    "details", "summary", "dl", "dt", "dd", "body", "html",
];

/// Converts markup with ATX headings and fenced code blocks.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, markup: &str) -> String {
        let parsed = Html::parse_fragment(markup);
        let mut writer = Writer::default();
        writer.children(parsed.root_element());
        writer.finish()
    }
}

impl MarkdownConverter for MarkdownRenderer {
    fn convert(&self, markup: &str) -> Result<String, CodecError> {
        Ok(self.render(markup))
    }
}

#[derive(Default)]
struct Writer {
    out: String,
    lists: Vec<ListState>,
}

struct ListState {
    ordered: bool,
    next: usize,
}

impl Writer {
    fn children(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    let text: &str = text;
                    self.text(text);
                }
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.element(child_element);
                    }
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, element: ElementRef<'_>) {
        let name = element.value().name();
        if SKIPPED.contains(&name) {
            return;
        }

        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                self.block_break();
                self.out.push_str(&"#".repeat(level));
                self.out.push(' ');
                self.children(element);
                self.block_break();
            }
            "br" => self.out.push('\n'),
            "hr" => {
                self.block_break();
                self.out.push_str("* * *");
                self.block_break();
            }
            "pre" => {
                let code: String = element.text().collect();
                self.block_break();
                self.out.push_str("```\n");
                self.out.push_str(code.trim_end_matches('\n'));
                self.out.push_str("\n```");
                self.block_break();
            }
            "code" => {
                let code: String = element.text().collect();
                self.out.push('`');
                self.out.push_str(&code);
                self.out.push('`');
            }
            "strong" | "b" => self.wrap(element, "**"),
            "em" | "i" => self.wrap(element, "_"),
            "a" => match element.value().attr("href") {
                Some(href) => {
                    self.out.push('[');
                    self.children(element);
                    self.out.push_str("](");
                    self.out.push_str(href);
                    self.out.push(')');
                }
                None => self.children(element),
            },
            "img" => {
                if let Some(src) = element.value().attr("src") {
                    let alt = element.value().attr("alt").unwrap_or_default();
                    self.out.push_str(&format!("![{}]({})", alt, src));
                }
            }
            "ul" | "ol" => {
                self.block_break();
                self.lists.push(ListState {
                    ordered: name == "ol",
                    next: 1,
                });
                self.children(element);
                self.lists.pop();
                self.block_break();
            }
            "li" => self.list_item(element),
            "blockquote" => {
                self.block_break();
                self.out.push_str("> ");
                self.children(element);
                self.block_break();
            }
            "td" | "th" => {
                self.children(element);
                self.out.push(' ');
            }
            _ if BLOCKS.contains(&name) => {
                self.block_break();
                self.children(element);
                self.block_break();
            }
            _ => self.children(element),
        }
    }

    fn list_item(&mut self, element: ElementRef<'_>) {
        self.line_break();
        let depth = self.lists.len().saturating_sub(1);
        self.out.push_str(&"  ".repeat(depth));
        let marker = match self.lists.last_mut() {
            Some(list) if list.ordered => {
                let marker = format!("{}. ", list.next);
                list.next += 1;
                marker
            }
            _ => "- ".to_string(),
        };
        self.out.push_str(&marker);
        self.children(element);
        self.line_break();
    }

    fn wrap(&mut self, element: ElementRef<'_>, delimiter: &str) {
        self.out.push_str(delimiter);
        self.children(element);
        self.out.push_str(delimiter);
    }

    fn text(&mut self, text: &str) {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let at_line_start = self.out.is_empty() || self.out.ends_with('\n') || self.out.ends_with(' ');
        if text.starts_with(char::is_whitespace) && !at_line_start {
            self.out.push(' ');
        }
        self.out.push_str(&collapsed);
        if text.ends_with(char::is_whitespace) && !collapsed.is_empty() {
            self.out.push(' ');
        }
    }

    fn line_break(&mut self) {
        self.trim_trailing_spaces();
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn block_break(&mut self) {
        self.trim_trailing_spaces();
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn trim_trailing_spaces(&mut self) {
        let trimmed = self.out.trim_end_matches(' ').len();
        self.out.truncate(trimmed);
    }

    fn finish(self) -> String {
        self.out
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
