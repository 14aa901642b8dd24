use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::{decode, encode, storage_key, EventStorage};
use crate::models::event::ProductionEvent;
use crate::services::database::Database;

/// Event lists kept in the `project_events` table.
pub struct SqliteEventStorage {
    db: Database,
}

impl SqliteEventStorage {
    /// Wrap an open database, creating the schema if needed.
    pub fn new(db: Database) -> Result<Self> {
        db.initialize_schema()?;
        Ok(Self { db })
    }

    pub fn open(path: &str) -> Result<Self> {
        Self::new(Database::new(path)?)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl EventStorage for SqliteEventStorage {
    fn load(&self, project_id: &str) -> Result<Option<Vec<ProductionEvent>>> {
        let key = storage_key(project_id);
        let payload: Option<String> = self
            .db
            .connection()
            .query_row(
                "SELECT payload FROM project_events WHERE storage_key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to query project events")?;

        payload
            .map(|payload| {
                decode(&payload).with_context(|| format!("Failed to decode events for {}", key))
            })
            .transpose()
    }

    fn save(&self, project_id: &str, events: &[ProductionEvent]) -> Result<()> {
        let key = storage_key(project_id);
        let payload = encode(events)?;

        self.db
            .connection()
            .execute(
                "INSERT INTO project_events (storage_key, payload, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(storage_key) DO UPDATE SET
                    payload = excluded.payload,
                    updated_at = CURRENT_TIMESTAMP",
                params![key, payload],
            )
            .context("Failed to save project events")?;

        log::debug!("Saved {} events under {}", events.len(), key);
        Ok(())
    }
}
