//! Year rollover transfer
//!
//! Copies reference data (firm details, units, items, customers) from the
//! previous year's database file into a freshly created one, then writes
//! every customer's computed closing balance as the new year's opening
//! balance. Each reference table is copied in its own transaction and
//! committed before the next begins; the balance propagation runs in one
//! final transaction of its own.
//!
//! A failure rolls back only the transaction in progress. Tables committed
//! earlier stay committed, so a failed rollover can leave the target file
//! partially populated; the operation still reports overall failure.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use std::fmt;
use std::path::Path;

use crate::error::{BillerError, BillerResult};
use crate::errorlog::ErrorLogger;
use crate::models::{BalanceType, CustomerId, Money};
use crate::storage::schema::{has_identity, REFERENCE_TABLES};
use crate::storage::open_database;

use super::balance::BalanceService;

/// Where a rollover currently stands; named in error text when it fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloverPhase {
    NotStarted,
    /// Copying reference table `REFERENCE_TABLES[i]`
    TransferringTable(usize),
    TransferringBalances,
    Committed,
}

impl fmt::Display for RolloverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::TransferringTable(i) => {
                write!(f, "transferring table {}", REFERENCE_TABLES[*i])
            }
            Self::TransferringBalances => write!(f, "transferring customer balances"),
            Self::Committed => write!(f, "committed"),
        }
    }
}

/// Rollover of one source year's data into a target year's file
pub struct YearRollover<'a> {
    source: &'a Connection,
    logger: Option<&'a ErrorLogger>,
}

impl<'a> YearRollover<'a> {
    pub fn new(source: &'a Connection) -> Self {
        Self {
            source,
            logger: None,
        }
    }

    /// Attach an error logger; rollback failures are recorded there
    pub fn with_logger(mut self, logger: &'a ErrorLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Run the transfer against the target connection
    ///
    /// Succeeds only if every table transfer and the full balance
    /// propagation committed. On failure the error names the phase that
    /// failed; earlier per-table commits are not undone.
    pub fn run(&self, target: &mut Connection) -> BillerResult<()> {
        let mut phase = RolloverPhase::NotStarted;

        self.run_phases(target, &mut phase).map_err(|e| {
            let message = format!("Year rollover failed while {}: {}", phase, e);
            self.log(&message);
            BillerError::Rollover(message)
        })
    }

    fn run_phases(&self, target: &mut Connection, phase: &mut RolloverPhase) -> BillerResult<()> {
        for (i, table) in REFERENCE_TABLES.iter().enumerate() {
            *phase = RolloverPhase::TransferringTable(i);
            let tx = target.transaction()?;

            let step = copy_table(self.source, &tx, table).and_then(|_| {
                if has_identity(table) {
                    reseed_identity(&tx, table)
                } else {
                    Ok(())
                }
            });

            match step {
                Ok(()) => tx.commit().map_err(|e| {
                    BillerError::Transaction(format!("Failed to commit {} transfer: {}", table, e))
                })?,
                Err(e) => {
                    self.rollback_logged(tx, &e);
                    return Err(e);
                }
            }
        }

        *phase = RolloverPhase::TransferringBalances;

        // Balances are read from the source before the target transaction
        // opens; one unreadable customer aborts the whole propagation.
        let balances = self.read_customer_balances()?;

        let tx = target.transaction()?;
        match write_opening_balances(&tx, &balances) {
            Ok(()) => tx.commit().map_err(|e| {
                BillerError::Transaction(format!("Failed to commit balance propagation: {}", e))
            })?,
            Err(e) => {
                self.rollback_logged(tx, &e);
                return Err(e);
            }
        }

        *phase = RolloverPhase::Committed;
        Ok(())
    }

    /// Compute the full (no-cutoff) balance of every source customer
    fn read_customer_balances(&self) -> BillerResult<Vec<(CustomerId, Money)>> {
        let mut stmt = self.source.prepare("SELECT ID FROM Customers")?;
        let ids: Vec<CustomerId> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<_, _>>()?;

        let calculator = BalanceService::new(self.source);
        ids.into_iter()
            .map(|id| {
                calculator
                    .customer_balance(id, None)
                    .map(|balance| (id, balance))
                    .map_err(|e| {
                        BillerError::Rollover(format!(
                            "Customer {} balance could not be read from the source database: {}",
                            id, e
                        ))
                    })
            })
            .collect()
    }

    /// Roll back an in-progress transaction, logging both errors if the
    /// rollback itself fails
    fn rollback_logged(&self, tx: rusqlite::Transaction<'_>, cause: &BillerError) {
        if let Err(rollback_err) = tx.rollback() {
            self.log(&format!(
                "Rollback failed after error: {}; rollback error: {}",
                cause, rollback_err
            ));
        }
    }

    fn log(&self, message: &str) {
        if let Some(logger) = self.logger {
            // Logging is best-effort on the failure path
            let _ = logger.log("rollover", message);
        }
    }
}

/// Open both year files and run a full rollover
pub fn transfer_year_data(
    source_path: &Path,
    target_path: &Path,
    password: &str,
    logger: Option<&ErrorLogger>,
) -> BillerResult<()> {
    let source = open_database(source_path, password)?;
    let mut target = open_database(target_path, password)?;

    let mut rollover = YearRollover::new(&source);
    if let Some(logger) = logger {
        rollover = rollover.with_logger(logger);
    }
    rollover.run(&mut target)
}

/// Copy every row of a table, preserving NULLs and stored ID values
///
/// Table names come from `REFERENCE_TABLES`, never from user input.
fn copy_table(source: &Connection, target: &Connection, table: &str) -> BillerResult<()> {
    let mut select = source.prepare(&format!("SELECT * FROM {}", table))?;
    let column_count = select.column_count();
    let columns = select
        .column_names()
        .iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=column_count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");

    let mut insert = target.prepare(&format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table, columns, placeholders
    ))?;

    let mut rows = select.query([])?;
    while let Some(row) = rows.next()? {
        let values: Vec<Value> = (0..column_count)
            .map(|i| row.get(i))
            .collect::<Result<_, _>>()?;
        insert.execute(params_from_iter(values))?;
    }

    Ok(())
}

/// Reseed the table's autoincrement counter to continue after the maximum
/// transferred ID, so rows added in the new year do not collide
fn reseed_identity(conn: &Connection, table: &str) -> BillerResult<()> {
    let max_id: Option<i64> =
        conn.query_row(&format!("SELECT MAX(ID) FROM {}", table), [], |row| row.get(0))?;
    let seed = max_id.unwrap_or(0);

    conn.execute("DELETE FROM sqlite_sequence WHERE name = ?1", params![table])?;
    conn.execute(
        "INSERT INTO sqlite_sequence (name, seq) VALUES (?1, ?2)",
        params![table, seed],
    )?;

    Ok(())
}

/// Write each customer's computed balance as the target row's opening
/// balance: magnitude plus 'C'/'D' flag, NULL flag when exactly zero
fn write_opening_balances(
    conn: &Connection,
    balances: &[(CustomerId, Money)],
) -> BillerResult<()> {
    let mut stmt = conn.prepare(
        "UPDATE Customers SET OpeningBalance = ?1, BalanceType = ?2 WHERE ID = ?3",
    )?;

    for (customer_id, balance) in balances {
        let flag = BalanceType::of(*balance).map(|t| t.as_db());
        stmt.execute(params![balance.abs(), flag, customer_id])?;
    }

    Ok(())
}
