//! Opening and creating financial-year database files
//!
//! The connection contract is a file path plus the fixed password from
//! settings. The password is applied with `PRAGMA key`, which protects the
//! file under an SQLCipher-enabled SQLite and is ignored by a stock build.

use chrono::NaiveDate;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use crate::error::{BillerError, BillerResult};

use super::schema;

/// Open an existing year database file
///
/// Fails with a connection error when the file is missing, locked, or not a
/// database.
pub fn open_database(path: &Path, password: &str) -> BillerResult<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| {
        BillerError::Connection(format!(
            "Failed to open database at {}: {}",
            path.display(),
            e
        ))
    })?;

    apply_connection_pragmas(&conn, password)?;
    Ok(conn)
}

/// Open a year database file without write access
///
/// Used when scanning candidate files; a listing must not take write locks
/// on them.
pub fn open_database_read_only(path: &Path, password: &str) -> BillerResult<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| {
        BillerError::Connection(format!(
            "Failed to open database at {}: {}",
            path.display(),
            e
        ))
    })?;

    apply_connection_pragmas(&conn, password)?;
    Ok(conn)
}

/// Create a new year database file with the full schema and header row
///
/// Refuses to overwrite an existing file.
pub fn create_year_database(
    path: &Path,
    password: &str,
    start_year: i32,
    books_start_date: NaiveDate,
) -> BillerResult<Connection> {
    if path.exists() {
        return Err(BillerError::Validation(format!(
            "Database file already exists: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| BillerError::Io(format!("Failed to create data directory: {}", e)))?;
    }

    let conn = Connection::open(path).map_err(|e| {
        BillerError::Connection(format!(
            "Failed to create database at {}: {}",
            path.display(),
            e
        ))
    })?;

    apply_connection_pragmas(&conn, password)?;
    schema::create_schema(&conn)?;

    conn.execute(
        "INSERT INTO FinancialYear (StartYear, BooksStartDate) VALUES (?1, ?2)",
        rusqlite::params![start_year, books_start_date],
    )?;

    Ok(conn)
}

/// Compact a year database file in place (`VACUUM`)
pub fn compact_database(conn: &Connection) -> BillerResult<()> {
    conn.execute_batch("VACUUM")
        .map_err(|e| BillerError::Query(format!("Failed to compact database: {}", e)))?;
    Ok(())
}

fn apply_connection_pragmas(conn: &Connection, password: &str) -> BillerResult<()> {
    // No-op on stock SQLite; keys the file under SQLCipher
    conn.pragma_update(None, "key", password)
        .map_err(|e| BillerError::Connection(format!("Failed to apply password: {}", e)))?;
    conn.pragma_update(None, "foreign_keys", true)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PASSWORD: &str = "test-password";

    fn start_date(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 4, 1).unwrap()
    }

    #[test]
    fn test_create_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("biller-FY-2024.bcz");

        let conn = create_year_database(&path, PASSWORD, 2024, start_date(2024)).unwrap();
        drop(conn);

        let conn = open_database(&path, PASSWORD).unwrap();
        let (year, books_start): (i32, NaiveDate) = conn
            .query_row(
                "SELECT StartYear, BooksStartDate FROM FinancialYear",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();

        assert_eq!(year, 2024);
        assert_eq!(books_start, start_date(2024));
    }

    #[test]
    fn test_create_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("biller-FY-2024.bcz");

        create_year_database(&path, PASSWORD, 2024, start_date(2024)).unwrap();
        let err = create_year_database(&path, PASSWORD, 2024, start_date(2024)).unwrap_err();
        assert!(matches!(err, BillerError::Validation(_)));
    }

    #[test]
    fn test_open_missing_file_is_connection_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.bcz");

        let err = open_database(&path, PASSWORD).unwrap_err();
        assert!(err.is_connection());
    }

    #[test]
    fn test_read_only_open_refuses_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("biller-FY-2024.bcz");
        drop(create_year_database(&path, PASSWORD, 2024, start_date(2024)).unwrap());

        let conn = open_database_read_only(&path, PASSWORD).unwrap();
        let year: i32 = conn
            .query_row("SELECT StartYear FROM FinancialYear", [], |row| row.get(0))
            .unwrap();
        assert_eq!(year, 2024);

        let err = conn.execute("INSERT INTO Customers (Name) VALUES ('X')", []);
        assert!(err.is_err());
    }

    #[test]
    fn test_compact() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("biller-FY-2024.bcz");

        let conn = create_year_database(&path, PASSWORD, 2024, start_date(2024)).unwrap();
        compact_database(&conn).unwrap();
    }
}
