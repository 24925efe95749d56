//! llms-txt-gen: crawl a website and summarize it for language models
//!
//! This crate crawls a site under depth/page/host limits, groups the crawled
//! pages into named sections, and renders them as an `llms.txt` link index or
//! an `llms-full.txt` content dump. Generated artifacts are kept in a
//! TTL-expiring result cache keyed by the canonical seed URL.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod output;
pub mod pipeline;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for llms-txt-gen operations
#[derive(Debug, Error)]
pub enum LlmsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL: {0}")]
    InvalidSeedUrl(#[from] UrlError),

    #[error("No pages found for {url}: site may be unreachable or blocking crawlers")]
    EmptyResult { url: String },

    #[error("Cache error: {0}")]
    Cache(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Crawl worker failed: {0}")]
    Join(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for llms-txt-gen operations
pub type Result<T> = std::result::Result<T, LlmsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use classify::{classify, Section};
pub use config::Config;
pub use crawler::{Crawler, Page, ProgressCallback};
pub use output::{generate, generate_full, OutputFormat};
pub use pipeline::{Pipeline, PipelineEvent, PipelineOutput};
pub use storage::{MemoryCache, ResultCache, SqliteCache};
pub use crate::url::canonicalize_seed;
