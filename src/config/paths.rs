//! Path management for biller-cli
//!
//! Provides platform-appropriate path resolution for configuration and the
//! error log, plus the naming conventions for financial-year database files.
//!
//! ## Path Resolution Order
//!
//! 1. `BILLER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/biller` or `~/.config/biller`
//! 3. Windows: `%APPDATA%\biller`

use std::path::{Path, PathBuf};

use crate::error::BillerError;

/// Application name; also names the data folder and database file prefix
pub const APP_NAME: &str = "biller";

/// Extension of financial-year database files
pub const DATABASE_FILE_EXTENSION: &str = "bcz";

/// Default file-name prefix for newly created year files
pub const DATABASE_NAME_PREFIX: &str = "biller-FY-";

/// Name of the data folder placed under the configured database root
pub const ROOT_DATA_FOLDER: &str = "biller-Data";

/// Manages all paths used by biller-cli
#[derive(Debug, Clone)]
pub struct BillerPaths {
    /// Base directory for configuration and the error log
    base_dir: PathBuf,
}

impl BillerPaths {
    /// Create a new BillerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be determined.
    pub fn new() -> Result<Self, BillerError> {
        let base_dir = if let Ok(custom) = std::env::var("BILLER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BillerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/biller/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the error log
    pub fn error_log(&self) -> PathBuf {
        self.base_dir.join("errors.log")
    }

    /// The data directory under a configured database root
    /// (`<root>/biller-Data/`)
    pub fn data_dir_under(root: &Path) -> PathBuf {
        root.join(ROOT_DATA_FOLDER)
    }

    /// The default file name for a new financial-year database
    /// (e.g. `biller-FY-2024.bcz`)
    pub fn year_file_name(start_year: i32) -> String {
        format!(
            "{}{}.{}",
            DATABASE_NAME_PREFIX, start_year, DATABASE_FILE_EXTENSION
        )
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), BillerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BillerError::Io(format!("Failed to create base directory: {}", e)))?;
        Ok(())
    }

    /// Check if biller has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BillerError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .map_err(|_| BillerError::Config("Could not determine home directory".into()))
        })?;
    Ok(config_base.join(APP_NAME))
}

/// Resolve the default base directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BillerError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BillerError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.error_log(), temp_dir.path().join("errors.log"));
    }

    #[test]
    fn test_data_dir_under_root() {
        let root = PathBuf::from("/srv/ledgers");
        assert_eq!(
            BillerPaths::data_dir_under(&root),
            PathBuf::from("/srv/ledgers/biller-Data")
        );
    }

    #[test]
    fn test_year_file_name() {
        assert_eq!(BillerPaths::year_file_name(2024), "biller-FY-2024.bcz");
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillerPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().exists());
    }
}
