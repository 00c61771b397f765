//! Custom error types for biller-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Errors are always surfaced as readable
//! text; nothing panics past a component boundary.

use thiserror::Error;

/// The main error type for biller-cli operations
#[derive(Error, Debug)]
pub enum BillerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Failure to open or use a year database file
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query or statement execution failure
    #[error("Query error: {0}")]
    Query(String),

    /// Transaction commit/rollback failure
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Year rollover transfer failure
    #[error("Rollover error: {0}")]
    Rollover(String),

    /// Financial-year registry failure
    #[error("Registry error: {0}")]
    Registry(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl BillerError {
    /// Create a "not found" error for customers
    pub fn customer_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Customer",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for financial years
    pub fn year_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Financial year",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a connection error
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BillerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BillerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for BillerError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _)
                if code.code == rusqlite::ErrorCode::CannotOpen
                    || code.code == rusqlite::ErrorCode::NotADatabase
                    || code.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                Self::Connection(err.to_string())
            }
            _ => Self::Query(err.to_string()),
        }
    }
}

/// Result type alias for biller-cli operations
pub type BillerResult<T> = Result<T, BillerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BillerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BillerError::customer_not_found("17");
        assert_eq!(err.to_string(), "Customer not found: 17");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let biller_err: BillerError = io_err.into();
        assert!(matches!(biller_err, BillerError::Io(_)));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let err: BillerError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, BillerError::Query(_)));
    }
}
