//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub stamping: StampingConfig,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Query model (LLM) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider name. Only "gemini" ships with domlens.
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            base_url: None,
            model: default_model(),
            temperature: None,
            max_output_tokens: None,
            connect_timeout_seconds: default_connect_timeout(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_timeout() -> u64 {
    300
}

/// Address stamping configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampingConfig {
    /// Initial length of generated addresses. Grows automatically when the
    /// address space fills up.
    #[serde(default = "default_address_length")]
    pub address_length: usize,

    /// Fixed RNG seed, for reproducible addresses in tests and demos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for StampingConfig {
    fn default() -> Self {
        Self {
            address_length: default_address_length(),
            seed: None,
        }
    }
}

fn default_address_length() -> usize {
    3
}

/// Markdown extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Collapse runs of blank lines into a single newline.
    #[serde(default = "default_true")]
    pub collapse_newlines: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            collapse_newlines: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for daily rolling log files. Console only when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: None,
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_file_prefix() -> String {
    "domlens.log".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
