//! Customer model
//!
//! A customer row as stored in a year's database file. The opening balance
//! is stored as a magnitude plus a sign flag; [`Customer::opening_balance_signed`]
//! resolves the two into a signed amount.

use serde::{Deserialize, Serialize};

use super::ids::CustomerId;
use super::money::{BalanceType, Money};

/// A customer in the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: Option<String>,
    pub phone_numbers: Option<String>,

    /// Opening balance magnitude; sign comes from `balance_type`
    pub opening_balance: Money,

    /// 'D' negates the magnitude; 'C' or NULL leaves it as-is
    pub balance_type: Option<BalanceType>,
}

impl Customer {
    /// The opening balance with the sign flag applied
    pub fn opening_balance_signed(&self) -> Money {
        BalanceType::signed(self.balance_type, self.opening_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(magnitude: i64, balance_type: Option<BalanceType>) -> Customer {
        Customer {
            id: CustomerId::new(1),
            name: "Acme Traders".into(),
            address: None,
            phone_numbers: None,
            opening_balance: Money::from_cents(magnitude),
            balance_type,
        }
    }

    #[test]
    fn test_debit_flag_negates() {
        let c = customer(10000, Some(BalanceType::Debit));
        assert_eq!(c.opening_balance_signed().cents(), -10000);
    }

    #[test]
    fn test_credit_and_null_keep_sign() {
        assert_eq!(
            customer(10000, Some(BalanceType::Credit))
                .opening_balance_signed()
                .cents(),
            10000
        );
        assert_eq!(customer(10000, None).opening_balance_signed().cents(), 10000);
    }
}
