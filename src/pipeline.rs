//! Crawl → classify → generate pipeline with result caching
//!
//! The pipeline is the entry point front-ends use. One call to
//! [`Pipeline::run`]:
//! 1. Canonicalizes the seed URL, which doubles as the cache key
//! 2. Returns a fresh cached artifact when one exists (unless `fresh`)
//! 3. Otherwise crawls, classifies and renders the site
//! 4. Stores the index artifact and raw pages in the cache
//!
//! Progress and the final outcome are also reported as [`PipelineEvent`]s,
//! whose serialized form is suitable for passing straight to an event stream.

use crate::classify::classify;
use crate::config::{validate, Config};
use crate::crawler::{Crawler, Page, ProgressCallback};
use crate::output::{generate, render, OutputFormat};
use crate::storage::{open_cache, ResultCache};
use crate::url::canonicalize_seed;
use crate::LlmsError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Observer for pipeline events
pub type EventSink = Arc<dyn Fn(&PipelineEvent) + Send + Sync>;

/// Event emitted while a pipeline run progresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum PipelineEvent {
    /// A page was accepted by the crawler
    Progress {
        pages_found: usize,
        current_url: String,
    },

    /// The run finished with an artifact
    Complete {
        result: String,
        cached: bool,
        pages_crawled: usize,
    },

    /// The run failed
    Error { message: String },
}

impl PipelineEvent {
    /// Event name used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Self::Progress { .. } => "progress",
            Self::Complete { .. } => "complete",
            Self::Error { .. } => "error",
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Rendered artifact in the requested format
    pub result: String,

    /// True if the artifact came from the cache
    pub cached: bool,

    /// Pages fetched by this run; zero for cache hits
    pub pages_crawled: usize,

    /// Pages the artifact was rendered from
    pub pages: Vec<Page>,
}

/// Site summarization pipeline
pub struct Pipeline {
    crawler: Crawler,
    cache: Arc<dyn ResultCache>,
}

impl Pipeline {
    pub fn new(crawler: Crawler, cache: Arc<dyn ResultCache>) -> Self {
        Self { crawler, cache }
    }

    /// Validates `config`, builds the crawler and opens the cache it describes
    pub fn from_config(config: &Config) -> Result<Self, LlmsError> {
        validate(config)?;
        let crawler = Crawler::new(config)?;
        let cache = open_cache(&config.cache)?;
        Ok(Self::new(crawler, cache))
    }

    pub fn crawler(&self) -> &Crawler {
        &self.crawler
    }

    pub fn cache(&self) -> &Arc<dyn ResultCache> {
        &self.cache
    }

    /// Produces the artifact for `url`
    ///
    /// With `fresh` set the cache is not consulted, but the new result is
    /// still stored. Cache failures are logged and never fail the run.
    ///
    /// # Returns
    ///
    /// * `Ok(PipelineOutput)` - The artifact and where it came from
    /// * `Err(LlmsError::InvalidSeedUrl)` - `url` is not an http(s) URL
    /// * `Err(LlmsError::EmptyResult)` - The crawl accepted no pages
    /// * `Err(LlmsError::Join)` - The crawl engine failed
    pub async fn run(
        &self,
        url: &str,
        format: OutputFormat,
        fresh: bool,
        events: Option<EventSink>,
    ) -> Result<PipelineOutput, LlmsError> {
        let result = self.run_inner(url, format, fresh, events.clone()).await;

        if let Some(sink) = &events {
            match &result {
                Ok(output) => sink(&PipelineEvent::Complete {
                    result: output.result.clone(),
                    cached: output.cached,
                    pages_crawled: output.pages_crawled,
                }),
                Err(e) => sink(&PipelineEvent::Error {
                    message: e.to_string(),
                }),
            }
        }

        result
    }

    async fn run_inner(
        &self,
        url: &str,
        format: OutputFormat,
        fresh: bool,
        events: Option<EventSink>,
    ) -> Result<PipelineOutput, LlmsError> {
        let seed = canonicalize_seed(url)?;
        let key = seed.as_str();

        if fresh {
            tracing::info!("Skipping cache lookup for {}", key);
        } else if let Some(output) = self.cached_output(key, format) {
            return Ok(output);
        }

        let progress: Option<ProgressCallback> = events.map(|sink| {
            let callback: ProgressCallback =
                Arc::new(move |pages_found: usize, current_url: &str| {
                    sink(&PipelineEvent::Progress {
                        pages_found,
                        current_url: current_url.to_string(),
                    })
                });
            callback
        });

        let pages = self.crawler.crawl(key, progress).await?;
        if pages.is_empty() {
            return Err(LlmsError::EmptyResult {
                url: key.to_string(),
            });
        }

        let (root, sections) = classify(&pages, key);
        let index = generate(&root, &sections);

        if let Err(e) = self.cache.set(key, &index, &pages) {
            tracing::warn!("Failed to cache result for {}: {}", key, e);
        }

        let result = match format {
            OutputFormat::Index => index,
            OutputFormat::Full => render(format, &root, &sections),
        };

        Ok(PipelineOutput {
            result,
            cached: false,
            pages_crawled: pages.len(),
            pages,
        })
    }

    /// Looks up a fresh cache entry and renders it in `format`
    ///
    /// The cache holds the index artifact; other formats are re-rendered from
    /// the cached pages.
    fn cached_output(&self, key: &str, format: OutputFormat) -> Option<PipelineOutput> {
        let hit = match self.cache.get(key) {
            Ok(Some(hit)) => hit,
            Ok(None) => {
                tracing::info!("Cache miss for {}", key);
                return None;
            }
            Err(e) => {
                tracing::warn!("Cache lookup failed for {}: {}", key, e);
                return None;
            }
        };

        tracing::info!("Cache hit for {} ({} pages)", key, hit.pages.len());

        let result = match format {
            OutputFormat::Index => hit.artifact,
            OutputFormat::Full => {
                let (root, sections) = classify(&hit.pages, key);
                render(format, &root, &sections)
            }
        };

        Some(PipelineOutput {
            result,
            cached: true,
            pages_crawled: 0,
            pages: hit.pages,
        })
    }
}
