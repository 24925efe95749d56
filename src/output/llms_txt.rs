//! llms.txt renderers
//!
//! Both renderers are pure functions over a root page and its sections.

use crate::classify::Section;
use crate::crawler::Page;
use std::fmt::Write;

/// Renders the link-index format (`llms.txt`)
///
/// ```text
/// # Site Title
///
/// > Site description
///
/// ## Main
///
/// - [About](https://example.com/about): Who we are
/// ```
pub fn generate(root: &Page, sections: &[Section]) -> String {
    let mut out = preamble(root);

    for section in sections {
        let _ = write!(out, "\n## {}\n\n", section.name);
        for page in &section.pages {
            if page.description.is_empty() {
                let _ = writeln!(out, "- [{}]({})", page.label(), page.url);
            } else {
                let _ = writeln!(
                    out,
                    "- [{}]({}): {}",
                    page.label(),
                    page.url,
                    page.description
                );
            }
        }
    }

    out
}

/// Renders the full-content format (`llms-full.txt`)
///
/// Each page gets a level-3 heading, a `URL:` line and its body text, falling
/// back to the description.
pub fn generate_full(root: &Page, sections: &[Section]) -> String {
    let mut out = preamble(root);

    for section in sections {
        let _ = writeln!(out, "\n## {}", section.name);
        for page in &section.pages {
            let _ = write!(out, "\n### {}\n\n", page.label());
            let _ = write!(out, "URL: {}\n\n", page.url);
            if !page.body_text.is_empty() {
                let _ = writeln!(out, "{}", page.body_text);
            } else if !page.description.is_empty() {
                let _ = writeln!(out, "{}", page.description);
            }
        }
    }

    out
}

/// Title heading and optional block-quoted description
fn preamble(root: &Page) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", site_title(root));
    if !root.description.is_empty() {
        let _ = write!(out, "\n> {}\n", root.description);
    }
    out
}

/// Site title: h1, else title, else URL
fn site_title(root: &Page) -> &str {
    if !root.h1.is_empty() {
        &root.h1
    } else if !root.title.is_empty() {
        &root.title
    } else {
        &root.url
    }
}
