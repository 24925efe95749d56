//! Database schema definitions
//!
//! This module contains the SQL schema for the result cache database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One rendered artifact per canonical seed URL
CREATE TABLE IF NOT EXISTS crawl_cache (
    url TEXT PRIMARY KEY,
    result TEXT NOT NULL,
    pages_json TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_crawl_cache_created ON crawl_cache(created_at);
"#;

/// Initializes the database schema
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
