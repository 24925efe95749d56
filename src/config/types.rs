use serde::{Deserialize, Serialize};

/// Main configuration structure for llms-txt-gen
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Traversal limits
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Hop limit from the seed URL (seed = 0)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of pages collected in one crawl
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Number of concurrently executing fetches
    pub parallelism: usize,

    /// Minimum time between requests to the same host (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Path prefixes that are never crawled
    #[serde(rename = "exclude-paths")]
    pub exclude_paths: Vec<String>,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_pages: 50,
            parallelism: 2,
            delay_ms: 200,
            exclude_paths: Vec::new(),
            request_timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Result cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Path to the SQLite cache database; `None` keeps the cache in memory
    #[serde(rename = "database-path")]
    pub database_path: Option<String>,

    /// Age after which a cached artifact is considered stale (seconds)
    #[serde(rename = "ttl-secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            database_path: Some("llms.db".to_string()),
            ttl_secs: 3600,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Artifact format rendered by default
    pub format: crate::output::OutputFormat,
}
