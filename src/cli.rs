//! CLI definitions for domlens.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// domlens CLI.
#[derive(Parser)]
#[command(name = "domlens")]
#[command(about = "Compact HTML pages for LLM queries and resolve the answers back to elements")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    /// Register a same-origin frame source as SRC=FILE (repeatable)
    #[arg(long = "frame", value_name = "SRC=FILE", global = true)]
    pub frames: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Flatten, stamp and compact a page; print the dictionary and token stream
    Compact {
        /// HTML file
        file: PathBuf,

        /// Write the stamped page here, for use with `resolve`
        #[arg(long)]
        stamped_out: Option<PathBuf>,
    },

    /// Resolve a JSON structure of addresses against a stamped page
    Resolve {
        /// Stamped HTML file
        file: PathBuf,

        /// JSON whose string leaves are addresses
        #[arg(short, long)]
        query: String,

        #[arg(short, long, value_enum, default_value_t = ResolveMode::Css)]
        mode: ResolveMode,
    },

    /// Print the page as Markdown
    Markdown {
        /// HTML file
        file: PathBuf,
    },

    /// Ask the configured model about a page
    Query {
        /// HTML file
        file: PathBuf,

        /// Natural language or GraphQL-like query
        text: String,

        #[arg(short, long, value_enum, default_value_t = QueryMode::Css)]
        mode: QueryMode,

        /// Gemini API key, overrides `model.api_key`
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}

/// How resolved addresses are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ResolveMode {
    /// Outer markup of each element
    Element,
    /// CSS selector paths
    Css,
    /// XPath expressions
    Xpath,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum QueryMode {
    Element,
    Css,
    Xpath,
    /// Extract values instead of locating elements
    Data,
}

/// Split `SRC=FILE`.
pub(crate) fn parse_frame_arg(arg: &str) -> Option<(&str, PathBuf)> {
    let (src, file) = arg.split_once('=')?;
    if src.is_empty() || file.is_empty() {
        return None;
    }
    Some((src, PathBuf::from(file)))
}
