//! Persistence of project event lists.
//!
//! Events are stored as one JSON array per project, under a key derived
//! from the project identifier. There is no versioning or migration of the
//! payload.

use std::fs;

use anyhow::{Context, Result};

use crate::models::event::ProductionEvent;
use crate::models::settings::{StorageBackend, TimelineSettings};
use crate::services::settings::data_dir;

mod json_file;
mod sqlite;

pub use json_file::JsonFileStorage;
pub use sqlite::SqliteEventStorage;

const DATABASE_FILE: &str = "production.db";
const JSON_DIR: &str = "events";

/// Storage key for a project's event list.
pub fn storage_key(project_id: &str) -> String {
    format!("production_events_{}", project_id)
}

/// Backend that loads and saves a project's whole event list.
#[cfg_attr(test, mockall::automock)]
pub trait EventStorage {
    /// Returns `None` when nothing has been saved for the project yet.
    fn load(&self, project_id: &str) -> Result<Option<Vec<ProductionEvent>>>;

    fn save(&self, project_id: &str, events: &[ProductionEvent]) -> Result<()>;
}

/// Backend selected by the settings, rooted in the configured data directory.
pub fn from_settings(settings: &TimelineSettings) -> Result<Box<dyn EventStorage>> {
    let dir = data_dir(settings)?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;

    let storage: Box<dyn EventStorage> = match settings.storage {
        StorageBackend::Sqlite => {
            let path = dir.join(DATABASE_FILE);
            let path = path
                .to_str()
                .with_context(|| format!("Database path {} is not UTF-8", path.display()))?;
            Box::new(SqliteEventStorage::open(path)?)
        }
        StorageBackend::Json => Box::new(JsonFileStorage::new(dir.join(JSON_DIR))),
    };

    log::info!("Using {:?} event storage in {}", settings.storage, dir.display());
    Ok(storage)
}

pub(crate) fn encode(events: &[ProductionEvent]) -> Result<String> {
    Ok(serde_json::to_string(events)?)
}

pub(crate) fn decode(payload: &str) -> Result<Vec<ProductionEvent>> {
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key() {
        assert_eq!(storage_key("feature-42"), "production_events_feature-42");
    }

    fn settings_in(dir: &std::path::Path, storage: StorageBackend) -> TimelineSettings {
        TimelineSettings {
            storage,
            data_dir: Some(dir.join("data")),
            ..TimelineSettings::default()
        }
    }

    #[test]
    fn test_from_settings_sqlite_backend() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = settings_in(temp_dir.path(), StorageBackend::Sqlite);

        let storage = from_settings(&settings).unwrap();
        storage.save("film", &[]).unwrap();

        assert!(temp_dir.path().join("data").join(DATABASE_FILE).exists());
        assert_eq!(storage.load("film").unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_from_settings_json_backend() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = settings_in(temp_dir.path(), StorageBackend::Json);

        let storage = from_settings(&settings).unwrap();
        storage.save("film", &[]).unwrap();

        let file = temp_dir
            .path()
            .join("data")
            .join(JSON_DIR)
            .join("production_events_film.json");
        assert!(file.exists());
        assert!(!temp_dir.path().join("data").join(DATABASE_FILE).exists());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("{not json").is_err());
        assert!(decode("[]").unwrap().is_empty());
    }
}
