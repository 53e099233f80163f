use crate::dlog;
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use std::path::Path;

/// Durable string key-value storage.
pub trait KeyValueStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Key-value store in a single SQLite table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let display = path.display();
        let conn =
            Connection::open(path).with_context(|| format!("Opening SQLite DB: {display}"))?;
        dlog!("storage_open path={}", path.display());
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Opening in-memory SQLite DB")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS kv (
              key         TEXT PRIMARY KEY,
              value       TEXT NOT NULL,
              updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )
        .context("Ensuring SQLite schema")?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                r"
                INSERT INTO kv (key, value) VALUES (?1, ?2)
                ON CONFLICT (key) DO UPDATE SET
                  value = excluded.value,
                  updated_at = datetime('now')
                ",
                params![key, value],
            )
            .with_context(|| format!("Writing key {key:?}"))?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .with_context(|| format!("Reading key {key:?}"))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .with_context(|| format!("Removing key {key:?}"))?;
        Ok(())
    }
}

/// Non-durable store for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls so far.
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &mut impl KeyValueStore) {
        assert_eq!(store.load("workouts").unwrap(), None);
        store.save("workouts", "[1]").unwrap();
        store.save("workouts", "[1,2]").unwrap();
        assert_eq!(store.load("workouts").unwrap().as_deref(), Some("[1,2]"));
        store.remove("workouts").unwrap();
        assert_eq!(store.load("workouts").unwrap(), None);
        store.remove("workouts").unwrap();
    }

    #[test]
    fn memory_store_behaves() {
        let mut store = MemoryStore::new();
        exercise(&mut store);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn sqlite_store_behaves() {
        exercise(&mut SqliteStore::in_memory().unwrap());
    }

    #[test]
    fn sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapty.sqlite3");
        SqliteStore::open(&path).unwrap().save("workouts", "[]").unwrap();
        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.load("workouts").unwrap().as_deref(), Some("[]"));
    }
}
