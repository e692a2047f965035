//! Persistent user preferences for the measurement tools

use directories::ProjectDirs;
use mapmeasure_core::UnitsConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const PREFS_SCHEMA_VERSION: u32 = 1;
const PREFS_FILE_NAME: &str = "preferences.json";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unable to resolve local data directory")]
    NoDataDirectory,
    #[error("unsupported preferences version {0}")]
    UnsupportedVersion(u32),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// User preferences persisted between sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub units: UnitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PreferencesEnvelope {
    version: u32,
    preferences: Preferences,
}

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn from_default_project() -> StorageResult<Self> {
        let dirs = ProjectDirs::from("dev", "MapMeasure", "MapMeasure")
            .ok_or(StorageError::NoDataDirectory)?;

        Ok(Self { root: dirs.data_local_dir().to_path_buf() })
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.root.join(PREFS_FILE_NAME)
    }

    /// Load stored preferences, or defaults if none were saved yet
    pub fn load_preferences(&self) -> StorageResult<Preferences> {
        let path = self.preferences_path();
        if !path.exists() {
            log::debug!("no preferences at {}, using defaults", path.display());
            return Ok(Preferences::default());
        }

        let bytes = fs::read(&path)?;
        let envelope: PreferencesEnvelope = serde_json::from_slice(&bytes)?;
        if envelope.version > PREFS_SCHEMA_VERSION {
            log::warn!(
                "preferences at {} have version {}, newer than {}",
                path.display(),
                envelope.version,
                PREFS_SCHEMA_VERSION
            );
            return Err(StorageError::UnsupportedVersion(envelope.version));
        }

        Ok(envelope.preferences)
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> StorageResult<()> {
        fs::create_dir_all(&self.root)?;

        let envelope =
            PreferencesEnvelope { version: PREFS_SCHEMA_VERSION, preferences: *preferences };

        let bytes = serde_json::to_vec_pretty(&envelope)?;
        fs::write(self.preferences_path(), bytes)?;
        log::debug!("saved preferences to {}", self.preferences_path().display());
        Ok(())
    }
}
