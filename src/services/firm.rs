//! Firm details service
//!
//! Reads and writes the singleton FirmDetails row of a year file.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{BillerError, BillerResult};
use crate::models::FirmDetails;

/// Access to the firm's own details in a year file
pub struct FirmService<'a> {
    conn: &'a Connection,
}

impl<'a> FirmService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The firm details row, or None when the file has none yet
    pub fn get(&self) -> BillerResult<Option<FirmDetails>> {
        let details = self
            .conn
            .query_row(
                "SELECT FirmName, FirmAddress, PhoneNumbers FROM FirmDetails",
                [],
                |row| {
                    Ok(FirmDetails {
                        name: row.get(0)?,
                        address: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        phone_numbers: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    })
                },
            )
            .optional()?;

        Ok(details)
    }

    /// Replace the firm details row; the table holds at most one
    ///
    /// Delete and insert run in one transaction, so a failed replace leaves
    /// the existing row untouched.
    pub fn set(&self, details: &FirmDetails) -> BillerResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM FirmDetails", [])?;
        tx.execute(
            "INSERT INTO FirmDetails (FirmName, FirmAddress, PhoneNumbers) VALUES (?1, ?2, ?3)",
            params![details.name, details.address, details.phone_numbers],
        )?;
        tx.commit().map_err(|e| {
            BillerError::Transaction(format!("Failed to commit firm details: {}", e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::create_schema;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_get_when_absent() {
        let conn = test_db();
        assert!(FirmService::new(&conn).get().unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let conn = test_db();
        let service = FirmService::new(&conn);

        let details = FirmDetails::new("Test Firm", "12 Market Road", "555-0100");
        service.set(&details).unwrap();
        assert_eq!(service.get().unwrap(), Some(details));
    }

    #[test]
    fn test_set_replaces_existing_row() {
        let conn = test_db();
        let service = FirmService::new(&conn);

        service
            .set(&FirmDetails::new("Old Firm", "", ""))
            .unwrap();
        service
            .set(&FirmDetails::new("New Firm", "", ""))
            .unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM FirmDetails", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(service.get().unwrap().unwrap().name, "New Firm");
    }

    #[test]
    fn test_failed_replace_keeps_existing_row() {
        let conn = test_db();
        let service = FirmService::new(&conn);
        service
            .set(&FirmDetails::new("Old Firm", "12 Market Road", ""))
            .unwrap();

        // Make the insert half of the replace fail
        conn.execute_batch(
            "CREATE TRIGGER block_insert BEFORE INSERT ON FirmDetails \
             BEGIN SELECT RAISE(ABORT, 'insert blocked'); END",
        )
        .unwrap();

        let err = service
            .set(&FirmDetails::new("New Firm", "", ""))
            .unwrap_err();
        assert!(matches!(err, BillerError::Query(_)));

        // The delete was rolled back along with the failed insert
        conn.execute_batch("DROP TRIGGER block_insert").unwrap();
        assert_eq!(service.get().unwrap().unwrap().name, "Old Firm");
    }

    #[test]
    fn test_null_columns_read_as_empty() {
        let conn = test_db();
        conn.execute(
            "INSERT INTO FirmDetails (FirmName, FirmAddress, PhoneNumbers) \
             VALUES ('Test Firm', NULL, NULL)",
            [],
        )
        .unwrap();

        let details = FirmService::new(&conn).get().unwrap().unwrap();
        assert_eq!(details.address, "");
        assert_eq!(details.phone_numbers, "");
    }
}
