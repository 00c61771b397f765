//! Firm detail commands

use clap::Subcommand;

use crate::cli::CliContext;
use crate::display::format_firm_details;
use crate::error::BillerResult;
use crate::models::FirmDetails;
use crate::services::FirmService;

#[derive(Subcommand)]
pub enum FirmCommands {
    /// Show the firm details printed on invoices
    Show {
        /// Financial year to read from (default: latest)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Set the firm details for a year
    Set {
        /// Firm name
        name: String,
        /// Postal address
        #[arg(long, default_value = "")]
        address: String,
        /// Phone numbers
        #[arg(long, default_value = "")]
        phone: String,
        /// Financial year to record in (default: latest)
        #[arg(long)]
        year: Option<i32>,
    },
}

pub fn handle_firm_command(ctx: &CliContext, command: FirmCommands) -> BillerResult<()> {
    match command {
        FirmCommands::Show { year } => {
            let session = ctx.open_session(year)?;
            match FirmService::new(session.connection()).get()? {
                Some(details) => print!("{}", format_firm_details(&details)),
                None => println!(
                    "No firm details set for {}. Set them with 'biller firm set'.",
                    session.year()
                ),
            }
            Ok(())
        }
        FirmCommands::Set {
            name,
            address,
            phone,
            year,
        } => {
            let session = ctx.open_session(year)?;
            let details = FirmDetails::new(name.trim(), address, phone);
            FirmService::new(session.connection()).set(&details)?;
            println!("Updated firm details for {}", session.year());
            Ok(())
        }
    }
}
