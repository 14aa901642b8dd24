// Database service module
// SQLite database connection and schema management

use anyhow::{Context, Result};
use rusqlite::Connection;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file (or ":memory:" for in-memory)
    ///
    /// # Examples
    /// ```
    /// use production_runner::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .context(format!("Failed to open database at {}", path))?;

        Ok(Self { conn })
    }

    /// Initialize the database schema
    /// Creates all required tables if they don't exist
    pub fn initialize_schema(&self) -> Result<()> {
        // One JSON blob of events per project
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS project_events (
                    storage_key TEXT PRIMARY KEY,
                    payload TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )
            .context("Failed to create project_events table")?;

        Ok(())
    }

    /// Get a reference to the database connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
