//! Page commands: compact, resolve, markdown and query.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use serde_json::Value;
use tracing::info;

use domlens_config::Config;
use domlens_core::{
    AddressQuery, AddressResolver, Compactor, HtmlMinifier, MarkdownExtractor, MarkdownOptions,
    PageQuery, ResolutionMode, Resolved, StampingOptions,
};
use domlens_dom_memory::{MarkdownRenderer, MemoryDocument, NodeId};
use domlens_protocols::DocumentHost;
use domlens_provider_gemini::GeminiModel;

use crate::cli::{QueryMode, ResolveMode, parse_frame_arg};

/// Frame sources given with `--frame SRC=FILE`.
pub(crate) fn load_frames(args: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| {
            let Some((src, file)) = parse_frame_arg(arg) else {
                bail!("invalid --frame value {:?}, expected SRC=FILE", arg);
            };
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("reading frame source {}", file.display()))?;
            Ok((src.to_string(), html))
        })
        .collect()
}

fn open_page(file: &Path, frames: &[(String, String)]) -> anyhow::Result<MemoryDocument> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("reading page {}", file.display()))?;
    Ok(frames
        .iter()
        .fold(MemoryDocument::parse(&html), |doc, (src, frame)| {
            doc.with_frame_source(src.clone(), frame.clone())
        }))
}

fn stamping_options(config: &Config) -> StampingOptions {
    StampingOptions {
        address_length: config.stamping.address_length,
        seed: config.stamping.seed,
    }
}

fn markdown_options(config: &Config) -> MarkdownOptions {
    MarkdownOptions {
        collapse_newlines: config.markdown.collapse_newlines,
    }
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) async fn compact(
    config: &Config,
    file: &Path,
    frames: &[(String, String)],
    stamped_out: Option<&Path>,
) -> anyhow::Result<()> {
    let doc = open_page(file, frames)?;
    let compactor = Compactor::new(Arc::new(HtmlMinifier::new()), stamping_options(config));
    let compaction = compactor.compact(&doc).await?;

    if compaction.is_empty() {
        info!("{} has nothing to compact", file.display());
    }
    println!("{}", compaction.page_structure());

    if let Some(out) = stamped_out {
        std::fs::write(out, doc.to_html())
            .with_context(|| format!("writing stamped page {}", out.display()))?;
        info!("Stamped page written to {}", out.display());
    }
    Ok(())
}

pub(crate) async fn resolve(
    file: &Path,
    frames: &[(String, String)],
    query: &str,
    mode: ResolveMode,
) -> anyhow::Result<()> {
    let doc = open_page(file, frames)?;
    let value: Value = serde_json::from_str(query).context("--query is not valid JSON")?;
    let query = AddressQuery::from(value);

    let mode = match mode {
        ResolveMode::Element => ResolutionMode::Element,
        ResolveMode::Css => ResolutionMode::CssPath,
        ResolveMode::Xpath => ResolutionMode::XPath,
    };
    let resolved = AddressResolver::resolve_strings(&doc, &query, mode).await?;
    print_json(&resolved.to_json())
}

pub(crate) async fn markdown(
    config: &Config,
    file: &Path,
    frames: &[(String, String)],
) -> anyhow::Result<()> {
    let doc = open_page(file, frames)?;
    let markdown = MarkdownExtractor::new(Arc::new(MarkdownRenderer::new()))
        .with_options(markdown_options(config))
        .extract(&doc)
        .await?;
    println!("{}", markdown);
    Ok(())
}

pub(crate) async fn query(
    mut config: Config,
    file: &Path,
    frames: &[(String, String)],
    text: &str,
    mode: QueryMode,
    api_key: Option<String>,
) -> anyhow::Result<()> {
    if api_key.is_some() {
        config.model.api_key = api_key;
    }
    let model = GeminiModel::from_config(&config.model)?;
    let page = PageQuery::new(Arc::new(model), Arc::new(MarkdownRenderer::new()))
        .with_stamping(stamping_options(&config))
        .with_markdown_options(markdown_options(&config));

    let doc = open_page(file, frames)?;
    let output = match mode {
        QueryMode::Element => {
            let resolved = page.elements_by_query(&doc, text).await?;
            element_markup(&doc, resolved).await?.to_json()
        }
        QueryMode::Css => page.css_paths_by_query(&doc, text).await?.to_json(),
        QueryMode::Xpath => page.xpaths_by_query(&doc, text).await?.to_json(),
        QueryMode::Data => page.data_by_query(&doc, text).await?,
    };
    print_json(&output)
}

/// Replace element handles with their outer markup for printing.
async fn element_markup(
    doc: &MemoryDocument,
    resolved: Resolved<NodeId>,
) -> anyhow::Result<Resolved<String>> {
    let mut markup = HashMap::new();
    for id in resolved.leaves() {
        markup.insert(*id, doc.outer_html(id).await?);
    }
    Ok(resolved.map(&|id| markup.get(&id).cloned().unwrap_or_default()))
}
