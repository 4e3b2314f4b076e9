#![forbid(unsafe_code)]

mod error;

pub use error::StoreError;

use kf_core::{AppData, DATA_FILE_NAME};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

const APP_DIR_NAME: &str = "koszty";

/// Per-user directory that holds the data file when nothing overrides it.
pub fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR_NAME}")))
}

/// Result of a save as reported to the UI; failures never block it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl SaveOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(err: &StoreError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
        }
    }
}

/// Single JSON blob on local disk, overwritten on every save.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    storage_dir: PathBuf,
    data_path: PathBuf,
}

impl JsonFileStore {
    /// Never fails: an unusable directory is logged, loads then yield `None`
    /// and saves report the failure.
    pub fn open(storage_dir: impl AsRef<Path>) -> Self {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        if let Err(err) = ensure_dir(&storage_dir) {
            warn!(error = %err, "storage directory unavailable, running on defaults");
        }
        let data_path = storage_dir.join(DATA_FILE_NAME);
        Self {
            storage_dir,
            data_path,
        }
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Raw persisted blob. Absent, unreadable and unparsable files all yield `None`.
    pub fn load(&self) -> Option<Value> {
        match self.read_value() {
            Ok(value) => Some(value),
            Err(err) if err.is_not_found() => {
                debug!(path = %self.data_path.display(), "no saved app data");
                None
            }
            Err(err) => {
                warn!(error = %err, "failed to load app data, falling back to defaults");
                None
            }
        }
    }

    /// Loaded data with categories normalized, or the defaults.
    pub fn load_app_data(&self) -> AppData {
        match self.load() {
            Some(Value::Null) | None => AppData::default(),
            Some(raw) => AppData::from_raw(&raw),
        }
    }

    /// Like [`Self::load_app_data`], and rewrites a file whose shape had to be
    /// healed so the canonical layout is on disk from the start.
    pub fn load_and_heal(&self) -> AppData {
        let raw = match self.load() {
            Some(Value::Null) | None => return AppData::default(),
            Some(raw) => raw,
        };
        let data = AppData::from_raw(&raw);
        let canonical = serde_json::to_value(&data).ok();
        if canonical.as_ref() != Some(&raw) {
            info!(path = %self.data_path.display(), "rewriting app data in canonical shape");
            let _ = self.save(&data);
        }
        data
    }

    pub fn save(&self, data: &AppData) -> SaveOutcome {
        match self.try_save(data) {
            Ok(()) => SaveOutcome::ok(),
            Err(err) => {
                error!(error = %err, "failed to save app data");
                SaveOutcome::failed(&err)
            }
        }
    }

    /// Writes pretty JSON to a sibling temp file, then renames it over the data file.
    pub fn try_save(&self, data: &AppData) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(data)
            .map_err(|err| StoreError::json(&self.data_path, err))?;
        ensure_dir(&self.storage_dir)?;
        let tmp_path = self.data_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, body).map_err(|err| StoreError::io(&tmp_path, err))?;
        std::fs::rename(&tmp_path, &self.data_path)
            .map_err(|err| StoreError::io(&self.data_path, err))?;
        debug!(path = %self.data_path.display(), "app data saved");
        Ok(())
    }

    fn read_value(&self) -> Result<Value, StoreError> {
        let bytes =
            std::fs::read(&self.data_path).map_err(|err| StoreError::io(&self.data_path, err))?;
        serde_json::from_slice(&bytes).map_err(|err| StoreError::json(&self.data_path, err))
    }
}

fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    std::fs::create_dir_all(dir).map_err(|err| StoreError::io(dir, err))
}
