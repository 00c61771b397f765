//! Persistent error log
//!
//! Errors surfaced to the user are also appended to a JSONL log file for
//! later inspection via `biller log`.

pub mod entry;
pub mod logger;

pub use entry::ErrorEntry;
pub use logger::ErrorLogger;
