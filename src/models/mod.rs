//! Core data models for biller-cli
//!
//! This module contains the data structures that represent the billing
//! domain: financial years, customers, the firm, and money amounts.

pub mod customer;
pub mod financial_year;
pub mod firm;
pub mod ids;
pub mod money;

pub use customer::Customer;
pub use financial_year::FinancialYear;
pub use firm::FirmDetails;
pub use ids::{BillId, CustomerId, ItemId, PaymentId, UnitId};
pub use money::{BalanceType, Money};
