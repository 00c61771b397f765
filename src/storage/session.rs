//! The active ledger session
//!
//! A [`Session`] is the explicit context every operation receives: the
//! selected financial year and the open connection to its database file.
//! There is no process-wide current connection or current year; whoever
//! needs one constructs it and passes it down.

use rusqlite::Connection;

use crate::config::Settings;
use crate::error::BillerResult;
use crate::models::FinancialYear;

use super::connection::open_database;

/// The selected financial year and its open database connection
pub struct Session {
    year: FinancialYear,
    conn: Connection,
}

impl Session {
    /// Open a session on a financial year's database file
    pub fn open(year: FinancialYear, settings: &Settings) -> BillerResult<Self> {
        let conn = open_database(&year.file_path, &settings.password)?;
        Ok(Self { year, conn })
    }

    /// Build a session from an already-open connection
    pub fn from_parts(year: FinancialYear, conn: Connection) -> Self {
        Self { year, conn }
    }

    /// The selected financial year
    pub fn year(&self) -> &FinancialYear {
        &self.year
    }

    /// The open connection to the year's database file
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access to the connection, for transactional operations
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
