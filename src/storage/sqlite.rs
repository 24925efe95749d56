//! SQLite cache implementation
//!
//! This module provides a SQLite-based implementation of the ResultCache trait.

use crate::crawler::Page;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{
    is_fresh, CacheEntryInfo, CachedResult, ResultCache, StorageError, StorageResult,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// SQLite cache backend
///
/// A single connection guarded by a mutex. Every operation holds the lock
/// only for its own statements, which serializes reads and writes of the
/// same key.
pub struct SqliteCache {
    conn: Mutex<Connection>,
    ttl: Duration,
}

impl SqliteCache {
    /// Opens or creates a cache database at `path`
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteCache)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path, ttl: Duration) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        tracing::debug!("Opened cache database {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
            ttl,
        })
    }

    /// Creates a cache backed by an in-memory database
    pub fn new_in_memory(ttl: Duration) -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::Timestamp(format!("{}: {}", raw, e)))
}

impl ResultCache for SqliteCache {
    fn get(&self, key: &str) -> StorageResult<Option<CachedResult>> {
        let conn = self.lock()?;

        let row = conn
            .query_row(
                "SELECT result, pages_json, created_at FROM crawl_cache WHERE url = ?1",
                params![key],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((artifact, pages_json, created_at)) = row else {
            return Ok(None);
        };

        if !is_fresh(parse_timestamp(&created_at)?, self.ttl, Utc::now()) {
            conn.execute("DELETE FROM crawl_cache WHERE url = ?1", params![key])?;
            tracing::debug!("Expired cache entry for {}", key);
            return Ok(None);
        }

        let pages: Vec<Page> = serde_json::from_str(&pages_json)?;
        Ok(Some(CachedResult { artifact, pages }))
    }

    fn set(&self, key: &str, artifact: &str, pages: &[Page]) -> StorageResult<()> {
        let pages_json = serde_json::to_string(pages)?;
        let now = format_timestamp(Utc::now());

        self.lock()?.execute(
            "INSERT OR REPLACE INTO crawl_cache (url, result, pages_json, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![key, artifact, pages_json, now],
        )?;
        Ok(())
    }

    fn entries(&self) -> StorageResult<Vec<CacheEntryInfo>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT url, pages_json, created_at FROM crawl_cache ORDER BY created_at")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let now = Utc::now();
        rows.into_iter()
            .map(|(key, pages_json, created_at)| -> StorageResult<CacheEntryInfo> {
                let created_at = parse_timestamp(&created_at)?;
                let pages: Vec<Page> = serde_json::from_str(&pages_json)?;
                Ok(CacheEntryInfo {
                    key,
                    created_at,
                    page_count: pages.len(),
                    fresh: is_fresh(created_at, self.ttl, now),
                })
            })
            .collect()
    }
}
