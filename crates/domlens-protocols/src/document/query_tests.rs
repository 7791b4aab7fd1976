use super::*;

fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_tags_match_case_insensitive() {
    let query = ElementQuery::tags(["script", "style", "svg"]);
    assert!(query.matches("svg", &[]));
    assert!(query.matches("SCRIPT", &[]));
    assert!(!query.matches("div", &[]));
}

#[test]
fn test_attribute_equals() {
    let query = ElementQuery::attribute_equals(ADDRESS_ATTRIBUTE, "aB3");
    assert!(query.matches("span", &attrs(&[("address", "aB3")])));
    assert!(!query.matches("span", &attrs(&[("address", "ab3")])));
    assert!(!query.matches("span", &[]));
}

#[test]
fn test_attribute_prefix_any_tag() {
    let query = ElementQuery::attribute_prefix("href", "data:");
    assert!(query.matches("a", &attrs(&[("href", "data:text/plain,hi")])));
    assert!(query.matches("span", &attrs(&[("href", "data:text/plain,hi")])));
    assert!(!query.matches("a", &attrs(&[("href", "/data:")])));
}

#[test]
fn test_to_css() {
    assert_eq!(ElementQuery::All.to_css(), "*");
    assert_eq!(
        ElementQuery::tags(["script", "style", "svg"]).to_css(),
        "script, style, svg"
    );
    assert_eq!(
        ElementQuery::attribute_equals("address", "x9Z").to_css(),
        "[address=\"x9Z\"]"
    );
    assert_eq!(
        ElementQuery::attribute_prefix("href", "data:").to_css(),
        "[href^=\"data:\"]"
    );
}

#[test]
fn test_to_css_escapes_quotes() {
    let query = ElementQuery::attribute_equals("address", "a\"b");
    assert_eq!(query.to_css(), "[address=\"a\\\"b\"]");
}

#[test]
fn test_new_element_builder() {
    let el = NewElement::new("div")
        .with_attribute(FRAME_MARKER_ATTRIBUTE, "true")
        .with_inner_html("<p>hi</p>");
    assert_eq!(el.tag, "div");
    assert_eq!(el.attributes, vec![("data-was-iframe".to_string(), "true".to_string())]);
    assert_eq!(el.inner_html, "<p>hi</p>");
}
