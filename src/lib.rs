//! biller - Billing and customer ledger for a small trading firm
//!
//! This library provides the core functionality for the biller CLI. Each
//! financial year (April through March) lives in its own database file, and
//! the application records customers, items, invoices and payments against
//! whichever year is open. At year end a rollover carries the firm details,
//! catalog and customer balances forward into the next year's file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, customers, financial years, etc.)
//! - `storage`: SQLite database layer and per-year sessions
//! - `services`: Business logic layer
//! - `errorlog`: Persistent error logging
//! - `display`: Terminal output formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use biller::config::{BillerPaths, Settings};
//! use biller::services::YearRegistry;
//!
//! let paths = BillerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let years = YearRegistry::new(settings.data_dir(&paths), settings.password.clone()).list()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod errorlog;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BillerError, BillerResult};
