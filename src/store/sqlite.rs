use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::store::migrations::run_migrations;
use crate::store::{Store, StoreError};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        debug!("opening store at {:?}", path);
        let conn = Connection::open(path)?;
        // WAL keeps the dashboard and one-off CLI calls from blocking each other
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }
}

impl Store for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(keys)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let tmp_dir = TempDir::new().unwrap();
        let db_path = tmp_dir.path().join("namaz.db");

        {
            let store = SqliteStore::open(&db_path).unwrap();
            store.set("2026-01-02", r#"{"note":"first"}"#).unwrap();
            store.set("2026-01-02", r#"{"note":"second"}"#).unwrap();
        }

        let store = SqliteStore::open(&db_path).unwrap();
        assert_eq!(
            store.get("2026-01-02").unwrap().as_deref(),
            Some(r#"{"note":"second"}"#)
        );
        assert_eq!(store.get("2026-01-03").unwrap(), None);
    }

    #[test]
    fn keys_are_sorted_and_clear_empties_the_table() {
        let tmp_dir = TempDir::new().unwrap();
        let store = SqliteStore::open(&tmp_dir.path().join("namaz.db")).unwrap();
        store.set("2026-02-01", "{}").unwrap();
        store.set("2026-01-31", "{}").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["2026-01-31", "2026-02-01"]);

        store.clear().unwrap();
        assert!(store.keys().unwrap().is_empty());
    }
}
