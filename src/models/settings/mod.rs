// Settings module
// Timeline geometry, interaction and storage preferences

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where project event lists are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Width of one day column in points
    pub day_width: f32,
    /// Height of a category header row
    pub header_height: f32,
    /// Height of a subcategory row
    pub row_height: f32,
    /// Pointer travel before a press turns into a drag
    pub drag_threshold: f32,
    /// Number of undo snapshots kept per project
    pub undo_limit: usize,
    pub storage: StorageBackend,
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            day_width: 40.0,
            header_height: 32.0,
            row_height: 28.0,
            drag_threshold: 4.0,
            undo_limit: 20,
            storage: StorageBackend::Sqlite,
            data_dir: None,
        }
    }
}

impl TimelineSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.day_width.is_finite() && self.day_width > 0.0) {
            return Err("day_width must be a positive number".to_string());
        }
        if !(self.header_height.is_finite() && self.header_height >= 0.0) {
            return Err("header_height cannot be negative".to_string());
        }
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err("row_height must be a positive number".to_string());
        }
        if !(self.drag_threshold.is_finite() && self.drag_threshold >= 0.0) {
            return Err("drag_threshold cannot be negative".to_string());
        }
        if self.undo_limit == 0 {
            return Err("undo_limit must be at least 1".to_string());
        }
        Ok(())
    }
}
