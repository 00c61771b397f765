//! Append-only error logger
//!
//! Persists surfaced errors so they can be inspected after the fact. The
//! log file uses a line-delimited JSON format (JSONL) where each line is a
//! complete JSON object representing one entry; each write is flushed
//! immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{BillerError, BillerResult};

use super::entry::ErrorEntry;

/// Handles writing error entries to the error log file
pub struct ErrorLogger {
    /// Path to the error log file
    log_path: PathBuf,
}

impl ErrorLogger {
    /// Create a new ErrorLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Record an error
    pub fn log(&self, component: &str, message: &str) -> BillerResult<()> {
        self.write(&ErrorEntry::new(component, message))
    }

    fn write(&self, entry: &ErrorEntry) -> BillerResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| BillerError::Io(format!("Failed to open error log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| BillerError::Json(format!("Failed to serialize error entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| BillerError::Io(format!("Failed to write error entry: {}", e)))?;

        file.flush()
            .map_err(|e| BillerError::Io(format!("Failed to flush error log: {}", e)))?;

        Ok(())
    }

    /// Read all entries from the log file, oldest first
    pub fn read_all(&self) -> BillerResult<Vec<ErrorEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| BillerError::Io(format!("Failed to open error log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                BillerError::Io(format!("Failed to read error log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: ErrorEntry = serde_json::from_str(&line).map_err(|e| {
                BillerError::Json(format!(
                    "Failed to parse error entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries from the log
    pub fn read_recent(&self, count: usize) -> BillerResult<Vec<ErrorEntry>> {
        let all_entries = self.read_all()?;
        let skip = all_entries.len().saturating_sub(count);
        Ok(all_entries.into_iter().skip(skip).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let logger = ErrorLogger::new(temp_dir.path().join("errors.log"));

        logger.log("rollover", "first failure").unwrap();
        logger.log("cli", "second failure").unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].component, "rollover");
        assert_eq!(entries[1].message, "second failure");
    }

    #[test]
    fn test_read_missing_log_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let logger = ErrorLogger::new(temp_dir.path().join("errors.log"));
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_recent() {
        let temp_dir = TempDir::new().unwrap();
        let logger = ErrorLogger::new(temp_dir.path().join("errors.log"));

        for i in 0..5 {
            logger.log("test", &format!("error {}", i)).unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "error 3");
        assert_eq!(recent[1].message, "error 4");
    }
}
