use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{decode, encode, storage_key, EventStorage};
use crate::models::event::ProductionEvent;

/// Event lists kept as `<storage key>.json` files in one directory.
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, project_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", storage_key(project_id)))
    }
}

impl EventStorage for JsonFileStorage {
    fn load(&self, project_id: &str) -> Result<Option<Vec<ProductionEvent>>> {
        let path = self.path_for(project_id);
        if !path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let events =
            decode(&payload).with_context(|| format!("Failed to decode {}", path.display()))?;
        Ok(Some(events))
    }

    fn save(&self, project_id: &str, events: &[ProductionEvent]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let path = self.path_for(project_id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, encode(events)?)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        log::debug!("Saved {} events to {}", events.len(), path.display());
        Ok(())
    }
}
