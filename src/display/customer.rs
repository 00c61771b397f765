//! Customer display formatting
//!
//! Formats customers and balances for terminal output. Balances use the
//! ledger DR./CR. notation.

use crate::services::customer::CustomerSummary;

/// Format a list of customers with balances as a table
pub fn format_customer_list(summaries: &[CustomerSummary]) -> String {
    if summaries.is_empty() {
        return "No customers found.".to_string();
    }

    let name_width = summaries
        .iter()
        .map(|s| s.customer.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {:>16}\n",
        "ID",
        "Name",
        "Balance",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->4}  {:-<name_width$}  {:->16}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for summary in summaries {
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {:>16}\n",
            summary.customer.id.to_string(),
            summary.customer.name,
            summary.balance.format_balance(),
            name_width = name_width,
        ));
    }

    output
}

/// Format a single customer's balance line
pub fn format_balance_line(name: &str, balance: crate::models::Money) -> String {
    format!("{}: {}", name, balance.format_balance())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, CustomerId, Money};

    fn summary(id: i64, name: &str, balance: i64) -> CustomerSummary {
        CustomerSummary {
            customer: Customer {
                id: CustomerId::new(id),
                name: name.into(),
                address: None,
                phone_numbers: None,
                opening_balance: Money::zero(),
                balance_type: None,
            },
            balance: Money::from_cents(balance),
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_customer_list(&[]), "No customers found.");
    }

    #[test]
    fn test_list_shows_ledger_notation() {
        let output = format_customer_list(&[
            summary(1, "Acme Traders", -10000),
            summary(2, "Zed Stores", 25000),
        ]);
        assert!(output.contains("100.00 DR."));
        assert!(output.contains("250.00 CR."));
    }

    #[test]
    fn test_balance_line() {
        assert_eq!(
            format_balance_line("Acme Traders", Money::from_cents(-1)),
            "Acme Traders: 0.01 DR."
        );
    }
}
