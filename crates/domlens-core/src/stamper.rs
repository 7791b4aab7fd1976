//! Address stamping and attribute minimization.

use serde::{Deserialize, Serialize};
use tracing::debug;

use domlens_protocols::{ADDRESS_ATTRIBUTE, DocumentError, DocumentHost, ElementQuery};

use crate::address::{AddressGenerator, DEFAULT_LENGTH};
use crate::sanitizer::DATA_SCHEME;

/// Attributes that survive stamping, in output order.
pub const KEPT_ATTRIBUTES: &[&str] = &["class", "id", "href"];

/// How addresses are drawn for a stamping pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampingOptions {
    pub address_length: usize,
    /// Fixed seed for reproducible addresses.
    pub seed: Option<u64>,
}

impl Default for StampingOptions {
    fn default() -> Self {
        Self {
            address_length: DEFAULT_LENGTH,
            seed: None,
        }
    }
}

impl StampingOptions {
    /// A fresh generator for one pass.
    pub fn generator(&self) -> AddressGenerator {
        match self.seed {
            Some(seed) => AddressGenerator::seeded(self.address_length, seed),
            None => AddressGenerator::new(self.address_length),
        }
    }
}

pub struct IdentityStamper;

impl IdentityStamper {
    /// Stamp every descendant of `scope` in document order.
    ///
    /// Each element keeps only non-empty `class`, `id` and a non-`data:`
    /// `href`, then receives a fresh `address`. Returns the number of
    /// stamped elements.
    pub async fn stamp<H: DocumentHost>(
        host: &H,
        scope: &H::Element,
        generator: &mut AddressGenerator,
    ) -> Result<usize, DocumentError> {
        let elements = host.query_all(Some(scope), &ElementQuery::All).await?;
        for element in &elements {
            let attributes = host.attributes(element).await?;
            let mut kept = minimized_attributes(&attributes);
            kept.push((ADDRESS_ATTRIBUTE.to_string(), generator.next_address()));
            host.replace_attributes(element, &kept).await?;
        }

        debug!(
            "Stamped {} elements (address length {})",
            elements.len(),
            generator.length()
        );
        Ok(elements.len())
    }
}

fn minimized_attributes(attributes: &[(String, String)]) -> Vec<(String, String)> {
    KEPT_ATTRIBUTES
        .iter()
        .filter_map(|name| {
            let (_, value) = attributes.iter().find(|(n, _)| n == name)?;
            if value.is_empty() || (*name == "href" && value.starts_with(DATA_SCHEME)) {
                return None;
            }
            Some((name.to_string(), value.clone()))
        })
        .collect()
}
