//! Customer balance calculator
//!
//! Computes a customer's net balance from three components: the signed
//! opening balance, the invoice total, and the payment total, optionally
//! bounded by a cutoff date. Debit balances (the customer owes) are
//! negative; credit balances are positive.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};

use crate::error::{BillerError, BillerResult};
use crate::models::{BalanceType, CustomerId, Money};

/// Balance computation over one year's database connection
pub struct BalanceService<'a> {
    conn: &'a Connection,
}

impl<'a> BalanceService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The customer's net balance: `opening − invoices + payments`
    ///
    /// With a cutoff date, only invoices and payments dated on or before it
    /// count. Any unreadable component fails the whole computation; there
    /// are no partial results.
    pub fn customer_balance(
        &self,
        customer_id: CustomerId,
        cutoff: Option<NaiveDate>,
    ) -> BillerResult<Money> {
        let opening = self.opening_balance(customer_id)?;
        let invoices = self.invoice_total(customer_id, cutoff)?;
        let payments = self.payment_total(customer_id, cutoff)?;

        Ok(opening - invoices + payments)
    }

    /// The signed opening balance: the stored magnitude, negated when the
    /// balance type flag is 'D'
    pub fn opening_balance(&self, customer_id: CustomerId) -> BillerResult<Money> {
        let row: Option<(Money, Option<String>)> = self
            .conn
            .query_row(
                "SELECT OpeningBalance, BalanceType FROM Customers WHERE ID = ?1",
                [customer_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (magnitude, flag) =
            row.ok_or_else(|| BillerError::customer_not_found(customer_id.to_string()))?;

        let balance_type = flag.as_deref().and_then(BalanceType::parse);
        Ok(BalanceType::signed(balance_type, magnitude))
    }

    /// Sum of `(line items) + expenses − discount` over the customer's bills
    ///
    /// A customer with no bills totals zero, not NULL.
    pub fn invoice_total(
        &self,
        customer_id: CustomerId,
        cutoff: Option<NaiveDate>,
    ) -> BillerResult<Money> {
        const SQL: &str = "
            SELECT COALESCE(SUM(
                COALESCE((SELECT SUM(Rate * Quantity)
                          FROM BillDetails WHERE BillID = BM.ID), 0)
                + BM.ExpenseAmount - BM.DiscountAmount), 0)
            FROM BillMaster BM
            WHERE BM.CustomerID = ?1";

        let total = match cutoff {
            Some(end_date) => self.conn.query_row(
                &format!("{} AND BM.BillDate <= ?2", SQL),
                rusqlite::params![customer_id, end_date],
                |row| row.get(0),
            )?,
            None => self.conn.query_row(SQL, [customer_id], |row| row.get(0))?,
        };

        Ok(total)
    }

    /// Sum of the customer's payment amounts
    ///
    /// A customer with no payments totals zero.
    pub fn payment_total(
        &self,
        customer_id: CustomerId,
        cutoff: Option<NaiveDate>,
    ) -> BillerResult<Money> {
        const SQL: &str =
            "SELECT COALESCE(SUM(Amount), 0) FROM Payments WHERE CustomerID = ?1";

        let total = match cutoff {
            Some(end_date) => self.conn.query_row(
                &format!("{} AND PaymentDate <= ?2", SQL),
                rusqlite::params![customer_id, end_date],
                |row| row.get(0),
            )?,
            None => self.conn.query_row(SQL, [customer_id], |row| row.get(0))?,
        };

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::create_schema;
    use rusqlite::params;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn
    }

    fn add_customer(conn: &Connection, opening: i64, balance_type: Option<&str>) -> CustomerId {
        conn.execute(
            "INSERT INTO Customers (Name, OpeningBalance, BalanceType) VALUES (?1, ?2, ?3)",
            params!["Test Customer", opening, balance_type],
        )
        .unwrap();
        CustomerId::new(conn.last_insert_rowid())
    }

    fn add_bill(
        conn: &Connection,
        customer: CustomerId,
        date: &str,
        expenses: i64,
        discount: i64,
        lines: &[(i64, i64)],
    ) {
        conn.execute(
            "INSERT INTO BillMaster (CustomerID, BillDate, ExpenseAmount, DiscountAmount) \
             VALUES (?1, ?2, ?3, ?4)",
            params![customer, date, expenses, discount],
        )
        .unwrap();
        let bill_id = conn.last_insert_rowid();
        for (rate, quantity) in lines {
            conn.execute(
                "INSERT INTO BillDetails (BillID, Rate, Quantity) VALUES (?1, ?2, ?3)",
                params![bill_id, rate, quantity],
            )
            .unwrap();
        }
    }

    fn add_payment(conn: &Connection, customer: CustomerId, date: &str, amount: i64) {
        conn.execute(
            "INSERT INTO Payments (CustomerID, PaymentDate, Amount) VALUES (?1, ?2, ?3)",
            params![customer, date, amount],
        )
        .unwrap();
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_balance_is_signed_opening_without_activity() {
        let conn = test_db();
        let debtor = add_customer(&conn, 10000, Some("D"));
        let creditor = add_customer(&conn, 25000, Some("C"));
        let unflagged = add_customer(&conn, 5000, None);

        let service = BalanceService::new(&conn);
        assert_eq!(service.customer_balance(debtor, None).unwrap().cents(), -10000);
        assert_eq!(service.customer_balance(creditor, None).unwrap().cents(), 25000);
        assert_eq!(service.customer_balance(unflagged, None).unwrap().cents(), 5000);
    }

    #[test]
    fn test_balance_full_computation() {
        let conn = test_db();
        let customer = add_customer(&conn, 10000, Some("C"));

        // Bill: 2 x 1500 + 3 x 200 line items, 500 expenses, 100 discount = 4000
        add_bill(&conn, customer, "2024-05-10", 500, 100, &[(1500, 2), (200, 3)]);
        add_payment(&conn, customer, "2024-06-01", 2500);

        let service = BalanceService::new(&conn);
        // 10000 - 4000 + 2500
        assert_eq!(service.customer_balance(customer, None).unwrap().cents(), 8500);
    }

    #[test]
    fn test_cutoff_before_activity_yields_opening_only() {
        let conn = test_db();
        let customer = add_customer(&conn, 10000, Some("D"));
        add_bill(&conn, customer, "2024-05-10", 0, 0, &[(1000, 1)]);
        add_payment(&conn, customer, "2024-06-01", 500);

        let service = BalanceService::new(&conn);
        let balance = service
            .customer_balance(customer, Some(date("2024-04-30")))
            .unwrap();
        assert_eq!(balance.cents(), -10000);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let conn = test_db();
        let customer = add_customer(&conn, 0, None);
        add_payment(&conn, customer, "2024-06-01", 500);

        let service = BalanceService::new(&conn);
        assert_eq!(
            service
                .payment_total(customer, Some(date("2024-06-01")))
                .unwrap()
                .cents(),
            500
        );
        assert_eq!(
            service
                .payment_total(customer, Some(date("2024-05-31")))
                .unwrap()
                .cents(),
            0
        );
    }

    #[test]
    fn test_bill_without_line_items_counts_expenses() {
        let conn = test_db();
        let customer = add_customer(&conn, 0, None);
        add_bill(&conn, customer, "2024-05-10", 700, 200, &[]);

        let service = BalanceService::new(&conn);
        assert_eq!(service.invoice_total(customer, None).unwrap().cents(), 500);
        assert_eq!(service.customer_balance(customer, None).unwrap().cents(), -500);
    }

    #[test]
    fn test_unknown_customer_is_not_found() {
        let conn = test_db();
        let service = BalanceService::new(&conn);
        let err = service
            .customer_balance(CustomerId::new(42), None)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_table_propagates_query_error() {
        let conn = test_db();
        let customer = add_customer(&conn, 0, None);
        conn.execute_batch("DROP TABLE Payments").unwrap();

        let service = BalanceService::new(&conn);
        let err = service.customer_balance(customer, None).unwrap_err();
        assert!(matches!(err, BillerError::Query(_)));
    }
}
