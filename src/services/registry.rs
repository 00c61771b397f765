//! Financial year registry
//!
//! Discovers financial-year database files in the data directory, reads each
//! file's header record, and presents the years ordered most-recent first.
//! Files that cannot be opened or carry no header row are not financial-year
//! files and are skipped silently.

use rusqlite::OptionalExtension;
use std::path::{Path, PathBuf};

use crate::config::paths::DATABASE_FILE_EXTENSION;
use crate::error::{BillerError, BillerResult};
use crate::models::FinancialYear;
use crate::storage::open_database_read_only;

/// Discovery and ordering of financial-year database files
pub struct YearRegistry {
    data_dir: PathBuf,
    password: String,
}

impl YearRegistry {
    pub fn new(data_dir: PathBuf, password: impl Into<String>) -> Self {
        Self {
            data_dir,
            password: password.into(),
        }
    }

    /// The directory being scanned
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// All financial years found in the data directory, descending by start
    /// year (most recent first)
    ///
    /// A missing data directory is a hard registry error; a directory with
    /// no valid year files returns an empty list.
    pub fn list(&self) -> BillerResult<Vec<FinancialYear>> {
        if !self.data_dir.is_dir() {
            return Err(BillerError::Registry(format!(
                "Data directory does not exist: {}",
                self.data_dir.display()
            )));
        }

        let entries = std::fs::read_dir(&self.data_dir).map_err(|e| {
            BillerError::Registry(format!(
                "Failed to read data directory {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;

        let mut years = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| BillerError::Registry(format!("Failed to read directory entry: {}", e)))?
                .path();

            if path.extension().and_then(|e| e.to_str()) != Some(DATABASE_FILE_EXTENSION) {
                continue;
            }

            if let Some(year) = self.read_year(&path) {
                years.push(year);
            }
        }

        years.sort();
        years.reverse();

        Ok(years)
    }

    /// Find the year file for a specific start year
    pub fn find(&self, start_year: i32) -> BillerResult<Option<FinancialYear>> {
        Ok(self.list()?.into_iter().find(|y| y.start_year == start_year))
    }

    /// The most recent financial year, if any exist
    pub fn latest(&self) -> BillerResult<Option<FinancialYear>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Read a file's FinancialYear header record
    ///
    /// Returns None when the file cannot be opened or has no header row;
    /// such a file is simply not a financial-year database.
    fn read_year(&self, path: &Path) -> Option<FinancialYear> {
        let conn = open_database_read_only(path, &self.password).ok()?;

        let header = conn
            .query_row(
                "SELECT StartYear, BooksStartDate FROM FinancialYear",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .ok()??;

        let (start_year, books_start_date) = header;
        Some(FinancialYear::new(start_year, books_start_date, path.to_path_buf()))
    }
}
