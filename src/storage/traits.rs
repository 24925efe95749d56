//! Cache traits and error types
//!
//! This module defines the trait interface for result cache backends and
//! associated error types.

use crate::crawler::Page;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid timestamp: {0}")]
    Timestamp(String),

    #[error("Cache lock poisoned")]
    LockPoisoned,
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result type for cache operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A fresh cache hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResult {
    /// The rendered artifact stored with the entry
    pub artifact: String,

    /// The crawled pages the artifact was rendered from
    pub pages: Vec<Page>,
}

/// Summary of one stored entry, fresh or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntryInfo {
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub page_count: usize,

    /// False once the entry is older than the TTL; it is removed on its next read
    pub fresh: bool,
}

/// Trait for result cache implementations
///
/// Keys are used verbatim; callers are responsible for canonicalizing them.
/// Expiry is lazy: a stale entry is reported as missing and deleted by the
/// `get` that finds it. Nothing sweeps entries in the background.
/// Implementations must be safe to share between tasks.
pub trait ResultCache: Send + Sync {
    /// Returns the entry for `key` if present and younger than the TTL
    ///
    /// A stale entry is deleted before returning `Ok(None)`.
    fn get(&self, key: &str) -> StorageResult<Option<CachedResult>>;

    /// Stores an entry, replacing any previous artifact, pages and timestamp
    fn set(&self, key: &str, artifact: &str, pages: &[Page]) -> StorageResult<()>;

    /// Lists stored entries, oldest first, without expiring anything
    fn entries(&self) -> StorageResult<Vec<CacheEntryInfo>>;
}

/// Returns true if an entry created at `created_at` is still within `ttl`
pub(crate) fn is_fresh(created_at: DateTime<Utc>, ttl: std::time::Duration, now: DateTime<Utc>) -> bool {
    match (now - created_at).to_std() {
        Ok(age) => age <= ttl,
        // Created in the future (clock skew)
        Err(_) => true,
    }
}
