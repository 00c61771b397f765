//! Service layer for biller-cli
//!
//! Business logic over the storage layer: balance computation, year
//! discovery, the rollover transfer, and record entry.

pub mod balance;
pub mod billing;
pub mod catalog;
pub mod customer;
pub mod firm;
pub mod registry;
pub mod rollover;

pub use balance::BalanceService;
pub use billing::{BillingService, InvoiceLine};
pub use catalog::CatalogService;
pub use customer::{CustomerService, CustomerSummary};
pub use firm::FirmService;
pub use registry::YearRegistry;
pub use rollover::{transfer_year_data, RolloverPhase, YearRollover};
