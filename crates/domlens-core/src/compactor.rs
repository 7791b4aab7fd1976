//! The flatten, sanitize, stamp and encode pipeline.

use std::sync::Arc;

use tracing::{debug, info};

use domlens_protocols::{DocumentHost, Minifier};

use crate::codec::{Compaction, DictionaryCodec};
use crate::error::QueryError;
use crate::flattener::FrameFlattener;
use crate::sanitizer::Sanitizer;
use crate::stamper::{IdentityStamper, StampingOptions};

/// Prepares a live document for an element query.
///
/// Compaction mutates the host: frames are inlined, non-content nodes are
/// removed and every element under `body` is restamped. The caller must
/// not run two compactions or a compaction and a resolution on the same
/// document at once.
#[derive(Clone)]
pub struct Compactor {
    codec: DictionaryCodec,
    stamping: StampingOptions,
}

impl Default for Compactor {
    fn default() -> Self {
        Self {
            codec: DictionaryCodec::default(),
            stamping: StampingOptions::default(),
        }
    }
}

impl Compactor {
    pub fn new(minifier: Arc<dyn Minifier>, stamping: StampingOptions) -> Self {
        Self {
            codec: DictionaryCodec::new(minifier),
            stamping,
        }
    }

    /// Run the pipeline. A document without a body yields an empty
    /// [`Compaction`].
    pub async fn compact<H: DocumentHost>(&self, host: &H) -> Result<Compaction, QueryError> {
        FrameFlattener::flatten_in_place(host).await?;

        let Some(body) = host.body().await? else {
            debug!("Document has no body, nothing to compact");
            return Ok(Compaction::default());
        };

        Sanitizer::sanitize(host, Some(&body)).await?;
        let mut generator = self.stamping.generator();
        IdentityStamper::stamp(host, &body, &mut generator).await?;

        let markup = host.inner_html(&body).await?;
        let compaction = self.codec.encode(&markup)?;
        info!(
            "Compacted {} bytes of markup to {} bytes ({} tags, {} shapes)",
            markup.len(),
            compaction.compacted.len() + compaction.dictionary_text().len(),
            compaction.token_count,
            compaction.dictionary.len()
        );
        Ok(compaction)
    }
}

/// Compact `host` with the default minifier and the given stamping options.
pub async fn compact_page<H: DocumentHost>(
    host: &H,
    stamping: &StampingOptions,
) -> Result<Compaction, QueryError> {
    Compactor {
        codec: DictionaryCodec::default(),
        stamping: stamping.clone(),
    }
    .compact(host)
    .await
}
