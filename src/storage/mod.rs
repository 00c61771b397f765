//! Storage layer for biller-cli
//!
//! One SQLite file per financial year, opened with the fixed password from
//! settings. This module owns the schema, connection handling, and the
//! session context passed to every service.

pub mod connection;
pub mod schema;
pub mod session;

pub use connection::{
    compact_database, create_year_database, open_database, open_database_read_only,
};
pub use session::Session;
