//! Crawl statistics
//!
//! Summarizes a crawl result and its classification for display after a
//! run.

use crate::classify::Section;
use crate::crawler::Page;
use std::collections::BTreeMap;

/// Size of one rendered section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSize {
    pub name: String,
    pub pages: usize,
    pub optional: bool,
}

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of accepted pages, root included
    pub total_pages: usize,

    /// Sum of page word counts
    pub total_words: usize,

    /// Pages with a non-empty description
    pub pages_with_description: usize,

    /// Page count per crawl depth
    pub pages_by_depth: BTreeMap<u32, usize>,

    /// Sections in render order
    pub sections: Vec<SectionSize>,
}

impl CrawlStatistics {
    /// Computes statistics for a crawl result and its sections
    pub fn new(pages: &[Page], sections: &[Section]) -> Self {
        let mut pages_by_depth = BTreeMap::new();
        for page in pages {
            *pages_by_depth.entry(page.depth).or_insert(0) += 1;
        }

        Self {
            total_pages: pages.len(),
            total_words: pages.iter().map(|p| p.word_count).sum(),
            pages_with_description: pages.iter().filter(|p| !p.description.is_empty()).count(),
            pages_by_depth,
            sections: sections
                .iter()
                .map(|s| SectionSize {
                    name: s.name.clone(),
                    pages: s.pages.len(),
                    optional: s.optional,
                })
                .collect(),
        }
    }

    /// Deepest hop count reached, if any page was crawled
    pub fn max_depth(&self) -> Option<u32> {
        self.pages_by_depth.keys().next_back().copied()
    }
}

/// Prints statistics to stderr in a formatted manner
///
/// Stdout is reserved for the generated artifact.
pub fn print_statistics(stats: &CrawlStatistics) {
    eprintln!("=== Crawl Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  Pages crawled: {}", stats.total_pages);
    eprintln!("  Total words: {}", stats.total_words);
    eprintln!(
        "  Pages with description: {}",
        stats.pages_with_description
    );
    if let Some(depth) = stats.max_depth() {
        eprintln!("  Max depth reached: {}", depth);
    }
    eprintln!();

    if !stats.pages_by_depth.is_empty() {
        eprintln!("Pages by Depth:");
        for (depth, count) in &stats.pages_by_depth {
            eprintln!("  {}: {}", depth, count);
        }
        eprintln!();
    }

    if !stats.sections.is_empty() {
        eprintln!("Sections:");
        for section in &stats.sections {
            let marker = if section.optional { " (optional)" } else { "" };
            eprintln!("  {}: {}{}", section.name, section.pages, marker);
        }
    }
}
