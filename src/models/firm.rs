//! Firm details model
//!
//! The firm's own name and contact details, stored as a single row per
//! database file and printed on invoices.

use serde::{Deserialize, Serialize};

/// The firm that issues the bills; singleton row in each year file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmDetails {
    pub name: String,
    pub address: String,
    pub phone_numbers: String,
}

impl FirmDetails {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone_numbers: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone_numbers: phone_numbers.into(),
        }
    }
}
