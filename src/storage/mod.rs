//! Storage module for the crawl result cache
//!
//! This module handles caching of generated artifacts, including:
//! - The `ResultCache` trait shared by all backends
//! - SQLite schema management and the SQLite-backed cache
//! - A process-local in-memory cache
//! - Lazy TTL expiry at read time

mod memory;
mod schema;
mod sqlite;
mod traits;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;
pub use traits::{CacheEntryInfo, CachedResult, ResultCache, StorageError, StorageResult};

use crate::config::CacheConfig;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Opens the cache described by `config`
///
/// A configured `database-path` selects the SQLite backend; without one the
/// cache lives in memory for the lifetime of the process.
///
/// # Returns
///
/// * `Ok(Arc<dyn ResultCache>)` - Ready to use
/// * `Err(StorageError)` - Failed to open the database
pub fn open_cache(config: &CacheConfig) -> StorageResult<Arc<dyn ResultCache>> {
    let ttl = Duration::from_secs(config.ttl_secs);
    match &config.database_path {
        Some(path) => Ok(Arc::new(SqliteCache::new(Path::new(path), ttl)?)),
        None => Ok(Arc::new(MemoryCache::new(ttl))),
    }
}
