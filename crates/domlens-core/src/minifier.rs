//! Regex based markup minifier.

use std::sync::LazyLock;

use regex::Regex;

use domlens_protocols::{CodecError, Minifier};

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static EMPTY_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s+(?:class|id|style|title|lang|dir)="""#).unwrap());
static REDUNDANT_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s+type="text/(?:javascript|css)""#).unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Tags whose surrounding whitespace never renders.
const BLOCK_TAGS: &str = "address|article|aside|blockquote|body|dd|details|div|dl|dt|fieldset|\
figcaption|figure|footer|form|frame|frameset|h[1-6]|head|header|hr|html|iframe|li|link|main|meta|\
nav|ol|option|p|pre|script|section|select|style|summary|table|tbody|td|tfoot|th|thead|title|tr|ul";

static BEFORE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\s+(</?(?:{})\b)", BLOCK_TAGS)).unwrap());
static AFTER_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(</?(?:{})\b[^>]*>)\s+", BLOCK_TAGS)).unwrap());

/// Whitespace and attribute minifier. Works on text only and never parses
/// the markup, so it is safe on fragments.
#[derive(Debug, Clone, Default)]
pub struct HtmlMinifier;

impl HtmlMinifier {
    pub fn new() -> Self {
        Self
    }

    pub fn minify_str(&self, markup: &str) -> String {
        let text = COMMENT.replace_all(markup, "");
        let text = EMPTY_ATTRIBUTE.replace_all(&text, "");
        let text = REDUNDANT_TYPE.replace_all(&text, "");
        let text = WHITESPACE.replace_all(&text, " ");
        let text = BEFORE_BLOCK.replace_all(&text, "$1");
        let text = AFTER_BLOCK.replace_all(&text, "$1");
        text.trim().to_string()
    }
}

impl Minifier for HtmlMinifier {
    fn minify(&self, markup: &str) -> Result<String, CodecError> {
        Ok(self.minify_str(markup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_comments() {
        let out = HtmlMinifier::new().minify_str("<div><!-- a\nmultiline note --><p>x</p></div>");
        assert_eq!(out, "<div><p>x</p></div>");
    }

    #[test]
    fn test_collapses_whitespace() {
        let out = HtmlMinifier::new().minify_str("\n  <ul>\n    <li>one   two</li>\n\t<li>three</li>\n  </ul>\n");
        assert_eq!(out, "<ul><li>one two</li><li>three</li></ul>");
    }

    #[test]
    fn test_keeps_one_space_between_inline_tags() {
        let out = HtmlMinifier::new().minify_str("<p><b>a</b>\n   <i>b</i></p>");
        assert_eq!(out, "<p><b>a</b> <i>b</i></p>");
    }

    #[test]
    fn test_drops_space_around_block_tags() {
        let out = HtmlMinifier::new().minify_str("<div> <span>x</span> </div> <p class=\"n\"> y </p>");
        assert_eq!(out, "<div><span>x</span></div><p class=\"n\">y</p>");
    }

    #[test]
    fn test_removes_empty_attributes() {
        let out = HtmlMinifier::new().minify_str("<div class=\"\" id=\"\" address=\"Ab1\">x</div>");
        assert_eq!(out, "<div address=\"Ab1\">x</div>");
    }

    #[test]
    fn test_keeps_non_empty_attributes() {
        let out = HtmlMinifier::new().minify_str("<a class=\"btn\" href=\"/x\">go</a>");
        assert_eq!(out, "<a class=\"btn\" href=\"/x\">go</a>");
    }

    #[test]
    fn test_removes_redundant_type() {
        let out = HtmlMinifier::new().minify_str("<script type=\"text/javascript\"></script>");
        assert_eq!(out, "<script></script>");
    }

    #[test]
    fn test_trait_path() {
        let minifier: &dyn Minifier = &HtmlMinifier::new();
        assert_eq!(minifier.minify(" <b>x</b> ").unwrap(), "<b>x</b>");
    }
}
