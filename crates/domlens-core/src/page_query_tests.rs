use super::*;
use std::sync::Mutex;

use async_trait::async_trait;
use domlens_dom_memory::{MarkdownRenderer, MemoryDocument};
use domlens_protocols::{DocumentHost, ModelError};
use regex::Regex;
use serde_json::json;

type Script = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Answers with a function of the prompt and records every prompt.
struct ScriptedModel {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn new(script: impl Fn(&str) -> String + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            script: Box::new(script),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryModel for ScriptedModel {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok((self.script)(prompt))
    }
}

struct Offline;

#[async_trait]
impl QueryModel for Offline {
    fn id(&self) -> &str {
        "offline"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
        Err(ModelError::Network("unreachable".into()))
    }
}

/// Address of the opening token right before `text` in a compacted page.
fn address_before(prompt: &str, text: &str) -> String {
    let pattern = Regex::new(&format!(r"\(([A-Za-z0-9]*)\){}", regex::escape(text))).unwrap();
    pattern.captures(prompt).unwrap()[1].to_string()
}

const SHOP: &str = r#"
<nav><a href="/cart" onclick="open()">Cart</a></nav>
<ul class="items">
  <li><span>Tea</span></li>
  <li><span>Coffee</span></li>
</ul>
"#;

fn query_for(model: Arc<dyn QueryModel>) -> PageQuery {
    PageQuery::new(model, Arc::new(MarkdownRenderer::new())).with_stamping(StampingOptions {
        address_length: 3,
        seed: Some(99),
    })
}

#[tokio::test]
async fn test_elements_by_query() {
    let model = ScriptedModel::new(|prompt| {
        format!(
            "```json\n{{\"cart\": \"{}\", \"items\": [\"{}\", \"{}\"], \"missing\": \"\"}}\n```",
            address_before(prompt, "Cart"),
            address_before(prompt, "Tea"),
            address_before(prompt, "Coffee"),
        )
    });
    let doc = MemoryDocument::parse(SHOP);
    let resolved = query_for(model.clone())
        .elements_by_query(&doc, "{ cart items[] missing }")
        .await
        .unwrap();

    let cart = resolved.get("cart").and_then(Resolved::as_leaf).unwrap();
    assert_eq!(doc.tag_name(cart).await.unwrap(), "a");
    let items = resolved.get("items").unwrap();
    let coffee = items.index(1).and_then(Resolved::as_leaf).unwrap();
    assert_eq!(doc.inner_html(coffee).await.unwrap(), "Coffee");
    assert!(resolved.get("missing").and_then(Resolved::as_leaf).is_none());

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("<!-- Tag Dictionary -->"));
    assert!(prompts[0].contains("<a href=\"/cart\">"));
    assert!(!prompts[0].contains("onclick"));
}

#[tokio::test]
async fn test_css_paths_and_xpaths_by_query() {
    let model = ScriptedModel::new(|prompt| {
        format!("{{\"coffee\": \"{}\"}}", address_before(prompt, "Coffee"))
    });
    let doc = MemoryDocument::parse(SHOP);
    let page = query_for(model);

    let css = page.css_paths_by_query(&doc, "coffee label").await.unwrap();
    assert_eq!(
        css.to_json(),
        json!({"coffee": "html > body > ul > li:nth-child(2) > span"})
    );

    let xpaths = page.xpaths_by_query(&doc, "coffee label").await.unwrap();
    assert_eq!(xpaths.to_json(), json!({"coffee": "/html/body/ul/li[2]/span"}));
}

#[tokio::test]
async fn test_data_by_query_uses_markdown() {
    let model = ScriptedModel::new(|_| "```json\n{\"products\": [\"Tea\", \"Coffee\"]}\n```".to_string());
    let doc = MemoryDocument::parse(SHOP);
    let before = doc.to_html();

    let data = query_for(model.clone())
        .data_by_query(&doc, "{ products[] }")
        .await
        .unwrap();
    assert_eq!(data, json!({"products": ["Tea", "Coffee"]}));

    let prompts = model.prompts();
    assert!(prompts[0].contains("[Cart](/cart)"));
    assert!(prompts[0].contains("- Coffee"));
    assert_eq!(doc.to_html(), before);
}

#[tokio::test]
async fn test_set_model_switches_backend() {
    let doc = MemoryDocument::parse(SHOP);
    let mut page = query_for(Arc::new(Offline));
    let err = page.data_by_query(&doc, "anything").await.unwrap_err();
    assert!(matches!(err, QueryError::Model(ModelError::Network(_))));

    page.set_model(ScriptedModel::new(|_| "{\"ok\": true}".to_string()));
    assert_eq!(page.model().id(), "scripted");
    assert_eq!(page.data_by_query(&doc, "anything").await.unwrap(), json!({"ok": true}));
}

#[tokio::test]
async fn test_unparseable_answer_is_an_error() {
    let model = ScriptedModel::new(|_| "Sorry, no idea.".to_string());
    let doc = MemoryDocument::parse(SHOP);
    let err = query_for(model).elements_by_query(&doc, "cart").await.unwrap_err();
    assert!(matches!(err, QueryError::JsonExtraction(_)));
}
