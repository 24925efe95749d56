//! Output module for rendering crawl results
//!
//! This module handles:
//! - Rendering sections as an `llms.txt` index or an `llms-full.txt` dump
//! - Selecting the output format
//! - Summarizing crawl statistics

mod llms_txt;
pub mod stats;

pub use llms_txt::{generate, generate_full};
pub use stats::{print_statistics, CrawlStatistics};

use crate::classify::Section;
use crate::crawler::Page;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Artifact format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Link index (`llms.txt`)
    #[default]
    Index,

    /// Full page content (`llms-full.txt`)
    Full,
}

impl OutputFormat {
    /// Conventional file name for this format
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Index => "llms.txt",
            Self::Full => "llms-full.txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => write!(f, "index"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// Renders `sections` in the requested format
pub fn render(format: OutputFormat, root: &Page, sections: &[Section]) -> String {
    match format {
        OutputFormat::Index => generate(root, sections),
        OutputFormat::Full => generate_full(root, sections),
    }
}
