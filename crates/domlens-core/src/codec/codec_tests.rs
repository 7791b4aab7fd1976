use super::*;

struct Identity;

impl Minifier for Identity {
    fn minify(&self, markup: &str) -> Result<String, CodecError> {
        Ok(markup.to_string())
    }
}

struct Failing;

impl Minifier for Failing {
    fn minify(&self, _markup: &str) -> Result<String, CodecError> {
        Err(CodecError::Minify("boom".into()))
    }
}

#[test]
fn test_shape_strips_address_only() {
    assert_eq!(
        shape_of("<span class=\"x\" address=\"aB3\">"),
        "<span class=\"x\">"
    );
    assert_eq!(shape_of("</span>"), "</span>");
    assert_eq!(address_of("<p address=\"Zz9\">"), Some("Zz9"));
    assert_eq!(address_of("<p>"), None);
}

#[test]
fn test_encode_span_scenario() {
    let codec = DictionaryCodec::default();
    let compaction = codec
        .encode("<div address=\"d01\"><span class=\"x\" address=\"s01\">A</span></div>")
        .unwrap();

    assert_eq!(
        compaction.dictionary_text(),
        "t1: <div>\nt2: <span class=\"x\">\nt3: </span>\nt4: </div>"
    );
    assert_eq!(compaction.compacted, "t1(d01)t2(s01)At3t4");
    assert_eq!(compaction.token_count, 4);
}

#[test]
fn test_repeated_shapes_share_one_token() {
    let codec = DictionaryCodec::new(Arc::new(Identity));
    let compaction = codec
        .encode("<ul><li address=\"a\">1</li><li address=\"b\">2</li><li address=\"c\">3</li></ul>")
        .unwrap();

    assert_eq!(compaction.dictionary.len(), 4);
    let li = compaction.dictionary.get("<li>").unwrap();
    let close = compaction.dictionary.get("</li>").unwrap();
    assert_eq!(compaction.compacted.matches(&format!("{}(", li)).count(), 3);
    assert_eq!(
        compaction.compacted,
        format!("t1()t2(a)1{close}t2(b)2{close}t2(c)3{close}t4")
    );
}

#[test]
fn test_missing_address_yields_empty_parens() {
    let codec = DictionaryCodec::new(Arc::new(Identity));
    let compaction = codec.encode("<br>").unwrap();
    assert_eq!(compaction.compacted, "t1()");
}

#[test]
fn test_page_structure_headers() {
    let codec = DictionaryCodec::default();
    let compaction = codec.encode("<b address=\"x\">hi</b>").unwrap();
    assert_eq!(
        compaction.page_structure(),
        "<!-- Tag Dictionary -->\nt1: <b>\nt2: </b>\n\n<!-- Minified HTML -->\nt1(x)hit2"
    );
}

#[test]
fn test_empty_markup() {
    let compaction = DictionaryCodec::default().encode("   ").unwrap();
    assert!(compaction.is_empty());
    assert_eq!(compaction.token_count, 0);
}

#[test]
fn test_minifier_failure_propagates() {
    let codec = DictionaryCodec::new(Arc::new(Failing));
    assert!(matches!(codec.encode("<p>"), Err(CodecError::Minify(_))));
}
