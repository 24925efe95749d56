use serde::{Deserialize, Serialize};

/// Metadata extracted from a single crawled page
///
/// Text fields are empty strings when the document did not provide them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Absolute URL the page was requested at
    pub url: String,

    /// Path component of `url`
    pub path: String,

    /// Hop count from the seed URL (seed = 0)
    pub depth: u32,

    /// Text of the `<title>` element
    pub title: String,

    /// Text of the first `<h1>` element
    pub h1: String,

    /// `meta[name=description]`, falling back to `meta[property=og:description]`
    pub description: String,

    /// Visible text of `<main>`, falling back to `<body>`
    #[serde(rename = "body", default)]
    pub body_text: String,

    /// Number of whitespace-separated tokens in `body_text`
    pub word_count: usize,
}

impl Page {
    /// Creates a page with only its location filled in
    pub fn new(url: &url::Url, depth: u32) -> Self {
        Self {
            url: url.to_string(),
            path: url.path().to_string(),
            depth,
            ..Self::default()
        }
    }

    /// Sets the body text and recomputes the word count
    pub fn set_body_text(&mut self, body_text: String) {
        self.word_count = body_text.split_whitespace().count();
        self.body_text = body_text;
    }

    /// Label used for links and headings: title, else h1, else path
    pub fn label(&self) -> &str {
        if !self.title.is_empty() {
            &self.title
        } else if !self.h1.is_empty() {
            &self.h1
        } else {
            &self.path
        }
    }
}
