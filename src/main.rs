//! domlens - compact live pages for LLM queries
//!
//! Main entry point for the domlens CLI.

mod cli;
mod cmd_page;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use domlens_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};

use crate::cli::{Cli, Commands};

/// Install console logging on stderr, plus a daily rolling file when
/// `logging.directory` is set. `RUST_LOG` overrides `logging.level`.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
    };

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter());

    let file = match &logging.directory {
        Some(directory) => {
            let directory = ConfigLoader::expand_path(directory);
            std::fs::create_dir_all(&directory)
                .with_context(|| format!("creating log directory {}", directory))?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(&logging.file_prefix)
                .max_log_files(14)
                .build(&directory)
                .context("creating log file appender")?;
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);

            // The guard flushes on drop; keep it for the life of the process.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_filter(env_filter()),
            )
        }
        None => None,
    };

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = ConfigLoader::load_or_default(path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    init_tracing(&config.logging)?;

    for warning in ConfigValidator::validate(&config).into_result()? {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    let frames = cmd_page::load_frames(&cli.frames)?;

    match cli.command {
        Commands::Compact { file, stamped_out } => {
            cmd_page::compact(&config, &file, &frames, stamped_out.as_deref()).await
        }
        Commands::Resolve { file, query, mode } => {
            cmd_page::resolve(&file, &frames, &query, mode).await
        }
        Commands::Markdown { file } => cmd_page::markdown(&config, &file, &frames).await,
        Commands::Query {
            file,
            text,
            mode,
            api_key,
        } => cmd_page::query(config, &file, &frames, &text, mode, api_key).await,
    }
}
