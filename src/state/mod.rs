//! State module for tracking crawl progress
//!
//! This module provides the shared state that concurrent crawl workers
//! coordinate through.
//!
//! # Components
//!
//! - `CrawlState`: visited set, frontier, result list and completion flag
//!   behind one lock
//! - `HostThrottle`: per-host minimum spacing between requests

mod crawl_state;
mod host_state;

// Re-export main types
pub use crawl_state::{CrawlState, QueuedLink};
pub use host_state::{HostState, HostThrottle};
