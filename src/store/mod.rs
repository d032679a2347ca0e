//! Flat key-value storage for daily prayer records.
//!
//! Every day lives under its `YYYY-MM-DD` key as a small JSON document. A few
//! non-date keys (settings carried over from older exports) may share the
//! same store and are excluded from data exports.

pub mod memory;
pub mod migrations;
pub mod records;
pub mod sqlite;

pub use memory::MemoryStore;
pub use records::RecordRepo;
pub use sqlite::SqliteStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Synchronous string key-value store.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// All keys, sorted ascending.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Remove every key.
    fn clear(&self) -> Result<(), StoreError>;
}
