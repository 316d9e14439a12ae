//! SQLite-backed durable slot.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use super::{DurableSlot, SlotError};

/// SQLite-backed key-value slot store.
pub struct SqliteSlot {
    conn: Mutex<Connection>,
}

impl SqliteSlot {
    /// Open the database file, creating it and the table if needed.
    pub fn new(path: &Path) -> Result<Self, SlotError> {
        let conn = Connection::open(path).map_err(|e| SlotError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, SlotError> {
        let conn =
            Connection::open_in_memory().map_err(|e| SlotError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), SlotError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv_slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| SlotError::Database(e.to_string()))?;

        Ok(())
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>, SlotError> {
        self.conn
            .lock()
            .map_err(|e| SlotError::Internal(format!("connection lock poisoned: {}", e)))
    }
}

impl DurableSlot for SqliteSlot {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT value FROM kv_slots WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| SlotError::Database(e.to_string()))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), SlotError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv_slots (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(|e| SlotError::Database(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SlotError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM kv_slots WHERE key = ?", params![key])
            .map_err(|e| SlotError::Database(e.to_string()))?;
        Ok(())
    }
}
