//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer. Handlers receive a
//! [`CliContext`] instead of reaching for any global state.

pub mod billing;
pub mod catalog;
pub mod customer;
pub mod firm;
pub mod log;
pub mod year;

pub use billing::{handle_invoice_command, handle_payment_command, InvoiceCommands, PaymentCommands};
pub use catalog::{handle_item_command, handle_unit_command, ItemCommands, UnitCommands};
pub use customer::{handle_balance_command, handle_customer_command, CustomerCommands};
pub use firm::{handle_firm_command, FirmCommands};
pub use log::handle_log_command;
pub use year::{handle_year_command, YearCommands};

use chrono::NaiveDate;

use crate::config::{BillerPaths, Settings};
use crate::error::{BillerError, BillerResult};
use crate::errorlog::ErrorLogger;
use crate::models::FinancialYear;
use crate::services::YearRegistry;
use crate::storage::Session;

/// Everything a command handler needs: paths, settings, and the means to
/// reach the year files
pub struct CliContext {
    pub paths: BillerPaths,
    pub settings: Settings,
}

impl CliContext {
    pub fn new(paths: BillerPaths, settings: Settings) -> Self {
        Self { paths, settings }
    }

    /// The registry over the configured data directory
    pub fn registry(&self) -> YearRegistry {
        YearRegistry::new(
            self.settings.data_dir(&self.paths),
            self.settings.password.clone(),
        )
    }

    /// The persistent error log
    pub fn logger(&self) -> ErrorLogger {
        ErrorLogger::new(self.paths.error_log())
    }

    /// Resolve a financial year: the requested start year, or the most
    /// recent year when none was given
    pub fn resolve_year(&self, start_year: Option<i32>) -> BillerResult<FinancialYear> {
        let registry = self.registry();
        match start_year {
            Some(year) => registry
                .find(year)?
                .ok_or_else(|| BillerError::year_not_found(year.to_string())),
            None => registry.latest()?.ok_or_else(|| {
                BillerError::Registry(
                    "No financial years found; create one with 'biller year create'".into(),
                )
            }),
        }
    }

    /// Open a session on the resolved financial year
    pub fn open_session(&self, start_year: Option<i32>) -> BillerResult<Session> {
        let year = self.resolve_year(start_year)?;
        Session::open(year, &self.settings)
    }
}

/// Parse a date argument in ISO format (YYYY-MM-DD)
pub fn parse_date(s: &str) -> BillerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| BillerError::Validation(format!("Invalid date (expected YYYY-MM-DD): {}", s)))
}

/// Parse an amount argument like "150.50" or "-12"
pub fn parse_money(s: &str) -> BillerResult<crate::models::Money> {
    crate::models::Money::parse(s)
        .map_err(|e| BillerError::Validation(format!("Invalid amount: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-04-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
        );
        assert!(parse_date("01/04/2024").is_err());
    }
}
