//! Loading and saving timeline settings as TOML.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::models::settings::TimelineSettings;

const SETTINGS_FILE: &str = "timeline.toml";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
    #[error("No home directory available for application data")]
    NoDataDir,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "ProductionRunner", "ProductionRunner")
}

/// Default location of the settings file in the platform config directory.
pub fn default_settings_path() -> Result<PathBuf, SettingsError> {
    project_dirs()
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
        .ok_or(SettingsError::NoDataDir)
}

/// Directory holding project data: the configured override or the platform
/// data directory.
pub fn data_dir(settings: &TimelineSettings) -> Result<PathBuf, SettingsError> {
    if let Some(dir) = &settings.data_dir {
        return Ok(dir.clone());
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(SettingsError::NoDataDir)
}

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the platform config directory.
    pub fn from_default_location() -> Result<Self, SettingsError> {
        Ok(Self::new(default_settings_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing file yields the defaults.
    pub fn load(&self) -> Result<TimelineSettings, SettingsError> {
        if !self.path.exists() {
            log::info!(
                "No settings file at {}, using defaults",
                self.path.display()
            );
            return Ok(TimelineSettings::default());
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| SettingsError::Read {
            path: self.path.clone(),
            source,
        })?;
        let settings: TimelineSettings =
            toml::from_str(&raw).map_err(|source| SettingsError::Parse {
                path: self.path.clone(),
                source,
            })?;
        settings.validate().map_err(SettingsError::Invalid)?;

        log::debug!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    pub fn save(&self, settings: &TimelineSettings) -> Result<(), SettingsError> {
        settings.validate().map_err(SettingsError::Invalid)?;

        let encoded = toml::to_string_pretty(settings)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, encoded).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<(), SettingsError> {
        self.save(&TimelineSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::StorageBackend;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("missing.toml"));
        assert_eq!(service.load().unwrap(), TimelineSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join(SETTINGS_FILE));

        let mut settings = TimelineSettings::default();
        settings.day_width = 56.0;
        settings.storage = StorageBackend::Json;
        settings.data_dir = Some(dir.path().join("data"));
        service.save(&settings).unwrap();

        assert_eq!(service.load().unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "day_width = 24.0\nstorage = \"json\"\n").unwrap();

        let settings = SettingsService::new(&path).load().unwrap();
        assert_eq!(settings.day_width, 24.0);
        assert_eq!(settings.storage, StorageBackend::Json);
        assert_eq!(settings.undo_limit, 20);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "day_width = -1.0\n").unwrap();

        let err = SettingsService::new(&path).load().unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "day_width = [").unwrap();

        let err = SettingsService::new(&path).load().unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn test_data_dir_override() {
        let mut settings = TimelineSettings::default();
        settings.data_dir = Some(PathBuf::from("/tmp/production-runner"));
        assert_eq!(
            data_dir(&settings).unwrap(),
            PathBuf::from("/tmp/production-runner")
        );
    }

    #[test]
    fn test_reset_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join(SETTINGS_FILE));
        let mut settings = TimelineSettings::default();
        settings.row_height = 40.0;
        service.save(&settings).unwrap();

        service.reset().unwrap();
        assert_eq!(service.load().unwrap(), TimelineSettings::default());
    }
}
