//! The four query entry points.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use domlens_protocols::{DocumentHost, MarkdownConverter, Minifier, QueryModel};

use crate::compactor::Compactor;
use crate::error::QueryError;
use crate::json::extract_json;
use crate::markdown::{MarkdownExtractor, MarkdownOptions};
use crate::minifier::HtmlMinifier;
use crate::prompts;
use crate::resolver::{AddressQuery, AddressResolver, Resolved};
use crate::stamper::StampingOptions;

/// Answers natural language or structured queries about a document.
///
/// Element queries compact and restamp the document before asking the
/// model, then resolve the returned addresses against the same document.
/// Queries against one document must not overlap.
pub struct PageQuery {
    model: Arc<dyn QueryModel>,
    minifier: Arc<dyn Minifier>,
    markdown: Arc<dyn MarkdownConverter>,
    stamping: StampingOptions,
    markdown_options: MarkdownOptions,
}

impl PageQuery {
    pub fn new(model: Arc<dyn QueryModel>, markdown: Arc<dyn MarkdownConverter>) -> Self {
        Self {
            model,
            minifier: Arc::new(HtmlMinifier::new()),
            markdown,
            stamping: StampingOptions::default(),
            markdown_options: MarkdownOptions::default(),
        }
    }

    pub fn with_minifier(mut self, minifier: Arc<dyn Minifier>) -> Self {
        self.minifier = minifier;
        self
    }

    pub fn with_stamping(mut self, stamping: StampingOptions) -> Self {
        self.stamping = stamping;
        self
    }

    pub fn with_markdown_options(mut self, options: MarkdownOptions) -> Self {
        self.markdown_options = options;
        self
    }

    /// Swap the model used by later queries.
    pub fn set_model(&mut self, model: Arc<dyn QueryModel>) {
        self.model = model;
    }

    pub fn model(&self) -> &Arc<dyn QueryModel> {
        &self.model
    }

    pub async fn elements_by_query<H: DocumentHost>(
        &self,
        host: &H,
        query: &str,
    ) -> Result<Resolved<H::Element>, QueryError> {
        let addresses = self.ask_for_addresses(host, query).await?;
        Ok(AddressResolver::resolve_elements(host, &addresses).await?)
    }

    pub async fn css_paths_by_query<H: DocumentHost>(
        &self,
        host: &H,
        query: &str,
    ) -> Result<Resolved<String>, QueryError> {
        let addresses = self.ask_for_addresses(host, query).await?;
        Ok(AddressResolver::resolve_css_paths(host, &addresses).await?)
    }

    pub async fn xpaths_by_query<H: DocumentHost>(
        &self,
        host: &H,
        query: &str,
    ) -> Result<Resolved<String>, QueryError> {
        let addresses = self.ask_for_addresses(host, query).await?;
        Ok(AddressResolver::resolve_xpaths(host, &addresses).await?)
    }

    /// Extract values from the page text. The live document is not changed.
    pub async fn data_by_query<H: DocumentHost>(
        &self,
        host: &H,
        query: &str,
    ) -> Result<Value, QueryError> {
        let content = MarkdownExtractor::new(Arc::clone(&self.markdown))
            .with_options(self.markdown_options.clone())
            .extract(host)
            .await?;
        let prompt = prompts::data_query(&content, query);
        debug!("Data query via {} ({} prompt bytes)", self.model.id(), prompt.len());
        let answer = self.model.complete(&prompt).await?;
        extract_json(&answer)
    }

    async fn ask_for_addresses<H: DocumentHost>(
        &self,
        host: &H,
        query: &str,
    ) -> Result<AddressQuery, QueryError> {
        let compaction = Compactor::new(Arc::clone(&self.minifier), self.stamping.clone())
            .compact(host)
            .await?;
        if compaction.is_empty() {
            debug!("Nothing to query, skipping the model call");
            return Ok(AddressQuery::Mapping(Default::default()));
        }

        let prompt = prompts::element_query(&compaction.page_structure(), query);
        debug!("Element query via {} ({} prompt bytes)", self.model.id(), prompt.len());
        let answer = self.model.complete(&prompt).await?;
        Ok(AddressQuery::from(extract_json(&answer)?))
    }
}

#[cfg(test)]
#[path = "page_query_tests.rs"]
mod tests;
