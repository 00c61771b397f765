//! Display formatting for terminal output

pub mod customer;
pub mod firm;
pub mod year;

pub use customer::{format_balance_line, format_customer_list};
pub use firm::format_firm_details;
pub use year::format_year_list;
