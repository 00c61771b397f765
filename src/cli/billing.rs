//! Invoice and payment commands

use clap::Subcommand;

use crate::cli::{parse_date, parse_money, CliContext};
use crate::error::{BillerError, BillerResult};
use crate::models::{CustomerId, ItemId};
use crate::services::{BillingService, CatalogService, InvoiceLine};

#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// Record an invoice for a customer
    Add {
        /// Customer ID
        customer_id: i64,
        /// Bill date (YYYY-MM-DD); must fall inside the financial year
        #[arg(long)]
        date: String,
        /// Line items as ITEM_ID:QUANTITY[:RATE]; the item's default rate
        /// applies when no rate is given. Repeatable.
        #[arg(long = "line")]
        lines: Vec<String>,
        /// Extra expenses added to the bill, e.g. freight
        #[arg(long, default_value = "0")]
        expenses: String,
        /// Discount subtracted from the bill
        #[arg(long, default_value = "0")]
        discount: String,
        /// Financial year to record in (default: latest)
        #[arg(long)]
        year: Option<i32>,
    },
}

#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Record a payment received from a customer
    Add {
        /// Customer ID
        customer_id: i64,
        /// Amount received
        amount: String,
        /// Payment date (YYYY-MM-DD); must fall inside the financial year
        #[arg(long)]
        date: String,
        /// Financial year to record in (default: latest)
        #[arg(long)]
        year: Option<i32>,
    },
}

pub fn handle_invoice_command(ctx: &CliContext, command: InvoiceCommands) -> BillerResult<()> {
    match command {
        InvoiceCommands::Add {
            customer_id,
            date,
            lines,
            expenses,
            discount,
            year,
        } => {
            let bill_date = parse_date(&date)?;
            let expenses = parse_money(&expenses)?;
            let discount = parse_money(&discount)?;

            let mut session = ctx.open_session(year)?;
            let fy = session.year().clone();

            let lines = resolve_lines(&session, &lines)?;
            let mut service = BillingService::new(session.connection_mut(), &fy);
            let bill_id =
                service.add_invoice(CustomerId::new(customer_id), bill_date, expenses, discount, &lines)?;
            println!("Recorded invoice #{} for customer #{}", bill_id, customer_id);
            Ok(())
        }
    }
}

pub fn handle_payment_command(ctx: &CliContext, command: PaymentCommands) -> BillerResult<()> {
    match command {
        PaymentCommands::Add {
            customer_id,
            amount,
            date,
            year,
        } => {
            let payment_date = parse_date(&date)?;
            let amount = parse_money(&amount)?;

            let mut session = ctx.open_session(year)?;
            let fy = session.year().clone();
            let service = BillingService::new(session.connection_mut(), &fy);
            let payment_id =
                service.add_payment(CustomerId::new(customer_id), payment_date, amount)?;
            println!(
                "Recorded payment #{} of {} from customer #{}",
                payment_id, amount, customer_id
            );
            Ok(())
        }
    }
}

/// Parse ITEM_ID:QUANTITY[:RATE] line arguments, filling in the item's
/// default rate where none was given
fn resolve_lines(
    session: &crate::storage::Session,
    specs: &[String],
) -> BillerResult<Vec<InvoiceLine>> {
    let catalog = CatalogService::new(session.connection());
    let mut lines = Vec::with_capacity(specs.len());
    for spec in specs {
        let parts: Vec<&str> = spec.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(BillerError::Validation(format!(
                "Invalid line (expected ITEM_ID:QUANTITY[:RATE]): {}",
                spec
            )));
        }
        let item_id: i64 = parts[0]
            .parse()
            .map_err(|_| BillerError::Validation(format!("Invalid item ID: {}", parts[0])))?;
        let quantity: i64 = parts[1]
            .parse()
            .map_err(|_| BillerError::Validation(format!("Invalid quantity: {}", parts[1])))?;
        let item_id = ItemId::new(item_id);
        let rate = match parts.get(2) {
            Some(s) => parse_money(s)?,
            None => catalog.get_item(item_id)?.rate,
        };
        lines.push(InvoiceLine {
            item_id: Some(item_id),
            rate,
            quantity,
        });
    }
    Ok(lines)
}
