//! Invoice and payment entry
//!
//! Records bills (header plus line items, atomically) and payments against
//! a customer, validating dates against the financial year's bookable range.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::error::{BillerError, BillerResult};
use crate::models::{BillId, CustomerId, FinancialYear, ItemId, Money, PaymentId};

/// One line of an invoice
#[derive(Debug, Clone)]
pub struct InvoiceLine {
    pub item_id: Option<ItemId>,
    pub rate: Money,
    pub quantity: i64,
}

/// Invoice and payment entry against one year's ledger
pub struct BillingService<'a> {
    conn: &'a mut Connection,
    year: &'a FinancialYear,
}

impl<'a> BillingService<'a> {
    pub fn new(conn: &'a mut Connection, year: &'a FinancialYear) -> Self {
        Self { conn, year }
    }

    /// Record an invoice: bill header and all line items in one transaction
    pub fn add_invoice(
        &mut self,
        customer_id: CustomerId,
        bill_date: NaiveDate,
        expenses: Money,
        discount: Money,
        lines: &[InvoiceLine],
    ) -> BillerResult<BillId> {
        self.check_date(bill_date)?;
        if lines.is_empty() && expenses.is_zero() {
            return Err(BillerError::Validation(
                "An invoice needs at least one line item or an expense amount".into(),
            ));
        }
        for line in lines {
            if line.quantity <= 0 {
                return Err(BillerError::Validation(
                    "Line item quantity must be positive".into(),
                ));
            }
        }

        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO BillMaster (CustomerID, BillDate, ExpenseAmount, DiscountAmount) \
             VALUES (?1, ?2, ?3, ?4)",
            params![customer_id, bill_date, expenses, discount],
        )?;
        let bill_id = BillId::new(tx.last_insert_rowid());

        {
            let mut stmt = tx.prepare(
                "INSERT INTO BillDetails (BillID, ItemID, Rate, Quantity) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for line in lines {
                stmt.execute(params![bill_id, line.item_id, line.rate, line.quantity])?;
            }
        }

        tx.commit()
            .map_err(|e| BillerError::Transaction(format!("Failed to commit invoice: {}", e)))?;

        Ok(bill_id)
    }

    /// Record a payment received from a customer
    pub fn add_payment(
        &self,
        customer_id: CustomerId,
        payment_date: NaiveDate,
        amount: Money,
    ) -> BillerResult<PaymentId> {
        self.check_date(payment_date)?;
        if !amount.is_positive() {
            return Err(BillerError::Validation(
                "Payment amount must be positive".into(),
            ));
        }

        self.conn.execute(
            "INSERT INTO Payments (CustomerID, PaymentDate, Amount) VALUES (?1, ?2, ?3)",
            params![customer_id, payment_date, amount],
        )?;

        Ok(PaymentId::new(self.conn.last_insert_rowid()))
    }

    fn check_date(&self, date: NaiveDate) -> BillerResult<()> {
        if date < self.year.min_date() || date > self.year.max_date() {
            return Err(BillerError::Validation(format!(
                "Date {} is outside the bookable range {} to {}",
                date,
                self.year.min_date(),
                self.year.max_date()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::balance::BalanceService;
    use crate::storage::schema::create_schema;
    use chrono::{Datelike, Local};
    use std::path::PathBuf;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn
    }

    /// A financial year whose bookable range contains today
    fn current_year() -> FinancialYear {
        let today = Local::now().date_naive();
        let start_year = if today.month() >= 4 {
            today.year()
        } else {
            today.year() - 1
        };
        FinancialYear::new(
            start_year,
            NaiveDate::from_ymd_opt(start_year, 4, 1).unwrap(),
            PathBuf::from("test.bcz"),
        )
    }

    fn add_customer(conn: &Connection) -> CustomerId {
        conn.execute("INSERT INTO Customers (Name) VALUES ('Acme Traders')", [])
            .unwrap();
        CustomerId::new(conn.last_insert_rowid())
    }

    #[test]
    fn test_invoice_and_payment_feed_the_balance() {
        let mut conn = test_db();
        let customer = add_customer(&conn);
        let year = current_year();
        let today = Local::now().date_naive();

        let mut billing = BillingService::new(&mut conn, &year);
        billing
            .add_invoice(
                customer,
                today,
                Money::from_cents(500),
                Money::from_cents(100),
                &[InvoiceLine {
                    item_id: None,
                    rate: Money::from_cents(1500),
                    quantity: 2,
                }],
            )
            .unwrap();
        billing
            .add_payment(customer, today, Money::from_cents(2000))
            .unwrap();

        // 0 - (3000 + 500 - 100) + 2000 = -1400
        let balance = BalanceService::new(&conn)
            .customer_balance(customer, None)
            .unwrap();
        assert_eq!(balance.cents(), -1400);
    }

    #[test]
    fn test_invoice_date_outside_year_rejected() {
        let mut conn = test_db();
        let customer = add_customer(&conn);
        let year = current_year();
        let before_books_open = year.min_date().pred_opt().unwrap();

        let mut billing = BillingService::new(&mut conn, &year);
        let err = billing
            .add_invoice(
                customer,
                before_books_open,
                Money::zero(),
                Money::zero(),
                &[InvoiceLine {
                    item_id: None,
                    rate: Money::from_cents(100),
                    quantity: 1,
                }],
            )
            .unwrap_err();
        assert!(matches!(err, BillerError::Validation(_)));
    }

    #[test]
    fn test_empty_invoice_rejected() {
        let mut conn = test_db();
        let customer = add_customer(&conn);
        let year = current_year();
        let today = Local::now().date_naive();

        let mut billing = BillingService::new(&mut conn, &year);
        let err = billing
            .add_invoice(customer, today, Money::zero(), Money::zero(), &[])
            .unwrap_err();
        assert!(matches!(err, BillerError::Validation(_)));
    }

    #[test]
    fn test_non_positive_payment_rejected() {
        let mut conn = test_db();
        let customer = add_customer(&conn);
        let year = current_year();
        let today = Local::now().date_naive();

        let billing = BillingService::new(&mut conn, &year);
        let err = billing
            .add_payment(customer, today, Money::zero())
            .unwrap_err();
        assert!(matches!(err, BillerError::Validation(_)));
    }
}
