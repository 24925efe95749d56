//! In-memory cache implementation

use crate::crawler::Page;
use crate::storage::traits::{
    is_fresh, CacheEntryInfo, CachedResult, ResultCache, StorageError, StorageResult,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone)]
struct Entry {
    artifact: String,
    pages: Vec<Page>,
    created_at: DateTime<Utc>,
}

/// Process-local cache with the same expiry rules as [`SqliteCache`]
///
/// [`SqliteCache`]: crate::storage::SqliteCache
#[derive(Debug)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, key: &str) -> StorageResult<Option<CachedResult>> {
        let mut entries = self.lock()?;

        let Some(entry) = entries.get(key) else {
            return Ok(None);
        };

        if !is_fresh(entry.created_at, self.ttl, Utc::now()) {
            entries.remove(key);
            tracing::debug!("Expired cache entry for {}", key);
            return Ok(None);
        }

        Ok(Some(CachedResult {
            artifact: entry.artifact.clone(),
            pages: entry.pages.clone(),
        }))
    }

    fn set(&self, key: &str, artifact: &str, pages: &[Page]) -> StorageResult<()> {
        self.lock()?.insert(
            key.to_string(),
            Entry {
                artifact: artifact.to_string(),
                pages: pages.to_vec(),
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn entries(&self) -> StorageResult<Vec<CacheEntryInfo>> {
        let now = Utc::now();
        let mut list: Vec<CacheEntryInfo> = self
            .lock()?
            .iter()
            .map(|(key, entry)| CacheEntryInfo {
                key: key.clone(),
                created_at: entry.created_at,
                page_count: entry.pages.len(),
                fresh: is_fresh(entry.created_at, self.ttl, now),
            })
            .collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.key.cmp(&b.key)));
        Ok(list)
    }
}
