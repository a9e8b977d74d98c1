//! SQLite-based store implementation.
//!
//! All collections share one `entries` table; values are JSON text.

use super::{Collection, Store};
use crate::error::{MurmurError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    collection TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (collection, key)
);
"#;

/// SQLite-based store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at `path`.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized SQLite store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| MurmurError::Storage(format!("Failed to acquire lock: {}", e)))
    }
}

#[async_trait]
impl Store for SqliteStore {
    #[instrument(skip(self))]
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>> {
        let conn = self.lock()?;

        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM entries WHERE collection = ?1 AND key = ?2",
                params![collection.as_str(), key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, value))]
    async fn put(&self, collection: Collection, key: &str, value: Value) -> Result<()> {
        let conn = self.lock()?;
        let text = serde_json::to_string(&value)?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO entries (collection, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![collection.as_str(), key, text, Utc::now().to_rfc3339()],
        )?;

        debug!("Stored {}/{}", collection, key);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: Collection, key: &str) -> Result<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute(
            "DELETE FROM entries WHERE collection = ?1 AND key = ?2",
            params![collection.as_str(), key],
        )?;
        Ok(deleted > 0)
    }

    async fn keys(&self, collection: Collection) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT key FROM entries WHERE collection = ?1 ORDER BY key")?;

        let rows = stmt.query_map(params![collection.as_str()], |row| row.get(0))?;

        let mut keys: Vec<String> = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }
}
