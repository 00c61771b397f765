//! Customer service
//!
//! Customer records and their listing with computed balances. The opening
//! balance is taken signed from the caller and stored as a magnitude plus
//! sign flag, the same convention the balance calculator reads back.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{BillerError, BillerResult};
use crate::models::{BalanceType, Customer, CustomerId, Money};

use super::balance::BalanceService;

/// A customer together with its current net balance
#[derive(Debug, Clone)]
pub struct CustomerSummary {
    pub customer: Customer,
    pub balance: Money,
}

/// Customer records in a year file
pub struct CustomerService<'a> {
    conn: &'a Connection,
}

impl<'a> CustomerService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Add a customer with a signed opening balance
    pub fn add(
        &self,
        name: &str,
        address: Option<&str>,
        phone_numbers: Option<&str>,
        opening_balance: Money,
    ) -> BillerResult<Customer> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BillerError::Validation("Customer name cannot be empty".into()));
        }

        let balance_type = BalanceType::of(opening_balance);
        self.conn.execute(
            "INSERT INTO Customers (Name, Address, PhoneNumbers, OpeningBalance, BalanceType) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                name,
                address,
                phone_numbers,
                opening_balance.abs(),
                balance_type.map(|t| t.as_db())
            ],
        )?;

        let id = CustomerId::new(self.conn.last_insert_rowid());
        self.get(id)
    }

    /// Fetch a customer by ID
    pub fn get(&self, id: CustomerId) -> BillerResult<Customer> {
        self.conn
            .query_row(
                "SELECT ID, Name, Address, PhoneNumbers, OpeningBalance, BalanceType \
                 FROM Customers WHERE ID = ?1",
                [id],
                row_to_customer,
            )
            .optional()?
            .ok_or_else(|| BillerError::customer_not_found(id.to_string()))
    }

    /// All customers, ordered by name
    pub fn list(&self) -> BillerResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(
            "SELECT ID, Name, Address, PhoneNumbers, OpeningBalance, BalanceType \
             FROM Customers ORDER BY Name",
        )?;
        let customers = stmt
            .query_map([], row_to_customer)?
            .collect::<Result<_, _>>()?;
        Ok(customers)
    }

    /// All customers with their computed net balances
    pub fn list_with_balances(&self) -> BillerResult<Vec<CustomerSummary>> {
        let calculator = BalanceService::new(self.conn);
        self.list()?
            .into_iter()
            .map(|customer| {
                calculator
                    .customer_balance(customer.id, None)
                    .map(|balance| CustomerSummary { customer, balance })
            })
            .collect()
    }
}

fn row_to_customer(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        phone_numbers: row.get(3)?,
        opening_balance: row.get(4)?,
        balance_type: row
            .get::<_, Option<String>>(5)?
            .as_deref()
            .and_then(BalanceType::parse),
    })
}
