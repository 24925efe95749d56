//! Configuration module for llms-txt-gen
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every table is optional; omitted keys take the crawler's defaults.
//!
//! # Example
//!
//! ```no_run
//! use llms_txt_gen::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("llms.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CacheConfig, Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
