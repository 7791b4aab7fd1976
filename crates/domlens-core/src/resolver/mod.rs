//! Resolution of address structures back into the document.
//!
//! Every address leaf costs one `[address="..."]` lookup. Nothing is
//! cached, and the walk never mutates the document.

mod paths;
mod query;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use domlens_protocols::{ADDRESS_ATTRIBUTE, DocumentError, DocumentHost, ElementQuery};

pub use paths::PathDeriver;
pub use query::{AddressQuery, Resolved};

/// What an address leaf resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    Element,
    CssPath,
    XPath,
}

pub struct AddressResolver;

impl AddressResolver {
    /// First element stamped with `address`. An empty address finds nothing.
    pub async fn lookup<H: DocumentHost>(
        host: &H,
        address: &str,
    ) -> Result<Option<H::Element>, DocumentError> {
        if address.is_empty() {
            return Ok(None);
        }
        host.query_first(&ElementQuery::attribute_equals(ADDRESS_ATTRIBUTE, address))
            .await
    }

    pub async fn resolve_elements<H: DocumentHost>(
        host: &H,
        query: &AddressQuery,
    ) -> Result<Resolved<H::Element>, DocumentError> {
        walk(host, &ElementLeaf, query).await
    }

    pub async fn resolve_css_paths<H: DocumentHost>(
        host: &H,
        query: &AddressQuery,
    ) -> Result<Resolved<String>, DocumentError> {
        walk(host, &PathLeaf(ResolutionMode::CssPath), query).await
    }

    pub async fn resolve_xpaths<H: DocumentHost>(
        host: &H,
        query: &AddressQuery,
    ) -> Result<Resolved<String>, DocumentError> {
        walk(host, &PathLeaf(ResolutionMode::XPath), query).await
    }

    /// Resolve to path strings. [`ResolutionMode::Element`] yields the
    /// element's outer markup, the only string form of a live handle.
    pub async fn resolve_strings<H: DocumentHost>(
        host: &H,
        query: &AddressQuery,
        mode: ResolutionMode,
    ) -> Result<Resolved<String>, DocumentError> {
        walk(host, &PathLeaf(mode), query).await
    }
}

#[async_trait]
trait LeafResolver<H: DocumentHost>: Sync {
    type Output: Send;

    async fn resolve_leaf(&self, host: &H, address: &str)
    -> Result<Option<Self::Output>, DocumentError>;
}

struct ElementLeaf;

#[async_trait]
impl<H: DocumentHost> LeafResolver<H> for ElementLeaf {
    type Output = H::Element;

    async fn resolve_leaf(&self, host: &H, address: &str) -> Result<Option<H::Element>, DocumentError> {
        AddressResolver::lookup(host, address).await
    }
}

struct PathLeaf(ResolutionMode);

#[async_trait]
impl<H: DocumentHost> LeafResolver<H> for PathLeaf {
    type Output = String;

    async fn resolve_leaf(&self, host: &H, address: &str) -> Result<Option<String>, DocumentError> {
        let Some(element) = AddressResolver::lookup(host, address).await? else {
            return Ok(None);
        };
        let path = match self.0 {
            ResolutionMode::CssPath => PathDeriver::css_path(host, &element).await?,
            ResolutionMode::XPath => PathDeriver::xpath(host, &element).await?,
            ResolutionMode::Element => host.outer_html(&element).await?,
        };
        Ok(Some(path))
    }
}

fn walk<'a, H, L>(
    host: &'a H,
    leaf: &'a L,
    query: &'a AddressQuery,
) -> BoxFuture<'a, Result<Resolved<L::Output>, DocumentError>>
where
    H: DocumentHost,
    L: LeafResolver<H>,
{
    async move {
        let resolved = match query {
            AddressQuery::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(walk(host, leaf, item).await?);
                }
                Resolved::Array(out)
            }
            AddressQuery::Mapping(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), walk(host, leaf, value).await?);
                }
                Resolved::Mapping(out)
            }
            AddressQuery::Address(address) => {
                let found = leaf.resolve_leaf(host, address).await?;
                trace!("Address {:?} resolved: {}", address, found.is_some());
                Resolved::Leaf(found)
            }
            AddressQuery::Scalar(value) => Resolved::Scalar(value.clone()),
        };
        Ok(resolved)
    }
    .boxed()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
