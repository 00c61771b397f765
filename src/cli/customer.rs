//! Customer commands

use clap::Subcommand;

use crate::cli::{parse_date, parse_money, CliContext};
use crate::display::{format_balance_line, format_customer_list};
use crate::error::BillerResult;
use crate::models::CustomerId;
use crate::services::{BalanceService, CustomerService};

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Add a customer
    Add {
        /// Customer name
        name: String,
        /// Postal address
        #[arg(long)]
        address: Option<String>,
        /// Phone numbers
        #[arg(long)]
        phone: Option<String>,
        /// Signed opening balance, e.g. "-150.00" for an amount the
        /// customer owes
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        opening: String,
        /// Financial year to record in (default: latest)
        #[arg(long)]
        year: Option<i32>,
    },
    /// List customers with their current balances
    List {
        /// Financial year to read from (default: latest)
        #[arg(long)]
        year: Option<i32>,
    },
}

pub fn handle_customer_command(ctx: &CliContext, command: CustomerCommands) -> BillerResult<()> {
    match command {
        CustomerCommands::Add {
            name,
            address,
            phone,
            opening,
            year,
        } => {
            let opening = parse_money(&opening)?;
            let session = ctx.open_session(year)?;
            let service = CustomerService::new(session.connection());
            let customer = service.add(&name, address.as_deref(), phone.as_deref(), opening)?;
            println!(
                "Added customer {} (#{}) to {}",
                customer.name,
                customer.id,
                session.year()
            );
            Ok(())
        }
        CustomerCommands::List { year } => {
            let session = ctx.open_session(year)?;
            let service = CustomerService::new(session.connection());
            let summaries = service.list_with_balances()?;
            if summaries.is_empty() {
                println!("No customers in {}.", session.year());
            } else {
                print!("{}", format_customer_list(&summaries));
            }
            Ok(())
        }
    }
}

/// Compute one customer's balance, optionally as of a cutoff date
pub fn handle_balance_command(
    ctx: &CliContext,
    customer_id: i64,
    as_of: Option<String>,
    year: Option<i32>,
) -> BillerResult<()> {
    let cutoff = as_of.as_deref().map(parse_date).transpose()?;
    let session = ctx.open_session(year)?;
    let customer_id = CustomerId::new(customer_id);

    let customer = CustomerService::new(session.connection()).get(customer_id)?;
    let balance = BalanceService::new(session.connection()).customer_balance(customer_id, cutoff)?;

    match cutoff {
        Some(date) => println!(
            "{} (as of {})",
            format_balance_line(&customer.name, balance),
            date
        ),
        None => println!("{}", format_balance_line(&customer.name, balance)),
    }
    Ok(())
}
