//! Schema for a financial-year database file
//!
//! Every year file carries the same eight tables. Monetary columns hold
//! integer cents and date columns hold ISO-8601 text, so SQL aggregates stay
//! exact and date comparisons work lexicographically.

use rusqlite::Connection;

use crate::error::BillerResult;

pub const TABLE_FINANCIAL_YEAR: &str = "FinancialYear";
pub const TABLE_FIRM_DETAILS: &str = "FirmDetails";
pub const TABLE_UNITS: &str = "UnitOfMeasurement";
pub const TABLE_ITEMS: &str = "Items";
pub const TABLE_CUSTOMERS: &str = "Customers";
pub const TABLE_BILL_MASTER: &str = "BillMaster";
pub const TABLE_BILL_DETAILS: &str = "BillDetails";
pub const TABLE_PAYMENTS: &str = "Payments";

/// Reference tables copied during a year rollover, in the fixed transfer
/// order. Dependency order matters: items reference units, bills reference
/// customers.
pub const REFERENCE_TABLES: [&str; 4] = [
    TABLE_FIRM_DETAILS,
    TABLE_UNITS,
    TABLE_ITEMS,
    TABLE_CUSTOMERS,
];

/// Whether a table has an autoincrement ID column whose values must be
/// preserved (and whose counter reseeded) when transferred
pub fn has_identity(table: &str) -> bool {
    table != TABLE_FIRM_DETAILS
}

const SCHEMA_SQL: &str = "
CREATE TABLE FinancialYear (
    StartYear      INTEGER NOT NULL,
    BooksStartDate TEXT    NOT NULL
);

CREATE TABLE FirmDetails (
    FirmName     TEXT NOT NULL,
    FirmAddress  TEXT,
    PhoneNumbers TEXT
);

CREATE TABLE UnitOfMeasurement (
    ID   INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT NOT NULL UNIQUE
);

CREATE TABLE Items (
    ID     INTEGER PRIMARY KEY AUTOINCREMENT,
    Name   TEXT NOT NULL,
    UnitID INTEGER REFERENCES UnitOfMeasurement(ID),
    Rate   INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE Customers (
    ID             INTEGER PRIMARY KEY AUTOINCREMENT,
    Name           TEXT NOT NULL,
    Address        TEXT,
    PhoneNumbers   TEXT,
    OpeningBalance INTEGER NOT NULL DEFAULT 0,
    BalanceType    TEXT
);

CREATE TABLE BillMaster (
    ID             INTEGER PRIMARY KEY AUTOINCREMENT,
    CustomerID     INTEGER NOT NULL REFERENCES Customers(ID),
    BillDate       TEXT    NOT NULL,
    ExpenseAmount  INTEGER NOT NULL DEFAULT 0,
    DiscountAmount INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE BillDetails (
    ID       INTEGER PRIMARY KEY AUTOINCREMENT,
    BillID   INTEGER NOT NULL REFERENCES BillMaster(ID),
    ItemID   INTEGER REFERENCES Items(ID),
    Rate     INTEGER NOT NULL,
    Quantity INTEGER NOT NULL
);

CREATE TABLE Payments (
    ID          INTEGER PRIMARY KEY AUTOINCREMENT,
    CustomerID  INTEGER NOT NULL REFERENCES Customers(ID),
    PaymentDate TEXT    NOT NULL,
    Amount      INTEGER NOT NULL
);
";

/// Create all tables in a freshly created year file
pub fn create_schema(conn: &Connection) -> BillerResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
