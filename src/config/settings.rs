//! User settings for biller-cli
//!
//! Manages user preferences: where the financial-year database files live,
//! the fixed database password, and display formatting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::BillerPaths;
use crate::error::BillerError;

/// User settings for biller-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Root directory the `biller-Data` folder is created under
    ///
    /// When unset, the config base directory is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_root: Option<PathBuf>,

    /// Fixed password applied to every year database file
    #[serde(default = "default_password")]
    pub password: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_password() -> String {
    // Effective only under an SQLCipher-enabled build; see storage::connection
    "biller".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            database_root: None,
            password: default_password(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// The directory financial-year files live in: `<root>/biller-Data/`
    pub fn data_dir(&self, paths: &BillerPaths) -> PathBuf {
        let root = self
            .database_root
            .clone()
            .unwrap_or_else(|| paths.base_dir().clone());
        BillerPaths::data_dir_under(&root)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BillerPaths) -> Result<Self, BillerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BillerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| BillerError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BillerPaths) -> Result<(), BillerError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BillerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| BillerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
