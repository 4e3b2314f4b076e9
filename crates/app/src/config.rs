#![forbid(unsafe_code)]

use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "KOSZTY_DATA_DIR";
pub const EXPORT_DIR_ENV: &str = "KOSZTY_EXPORT_DIR";
pub const LOG_ENV: &str = "KOSZTY_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `app-data.json`.
    pub data_dir: PathBuf,
    /// Directory generated PDFs are written to.
    pub export_dir: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration from `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let data_dir = value(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(kf_storage::default_storage_dir);
        let export_dir = value(EXPORT_DIR_ENV)
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| data_dir.clone());
        let log_filter = value(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            data_dir,
            export_dir,
            log_filter,
        }
    }
}
