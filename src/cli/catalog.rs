//! Unit and item commands

use clap::Subcommand;

use crate::cli::{parse_money, CliContext};
use crate::error::BillerResult;
use crate::models::UnitId;
use crate::services::CatalogService;

#[derive(Subcommand)]
pub enum UnitCommands {
    /// Add a unit of measurement, e.g. "Kg" or "Dozen"
    Add {
        /// Unit name
        name: String,
        /// Financial year to record in (default: latest)
        #[arg(long)]
        year: Option<i32>,
    },
}

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add a billable item with its default rate
    Add {
        /// Item name
        name: String,
        /// Default rate per unit, e.g. "45.50"
        rate: String,
        /// Unit of measurement ID
        #[arg(long)]
        unit: Option<i64>,
        /// Financial year to record in (default: latest)
        #[arg(long)]
        year: Option<i32>,
    },
    /// List items with their units and rates
    List {
        /// Financial year to read from (default: latest)
        #[arg(long)]
        year: Option<i32>,
    },
}

pub fn handle_unit_command(ctx: &CliContext, command: UnitCommands) -> BillerResult<()> {
    match command {
        UnitCommands::Add { name, year } => {
            let session = ctx.open_session(year)?;
            let id = CatalogService::new(session.connection()).add_unit(&name)?;
            println!("Added unit {} (#{}) to {}", name.trim(), id, session.year());
            Ok(())
        }
    }
}

pub fn handle_item_command(ctx: &CliContext, command: ItemCommands) -> BillerResult<()> {
    match command {
        ItemCommands::Add {
            name,
            rate,
            unit,
            year,
        } => {
            let rate = parse_money(&rate)?;
            let session = ctx.open_session(year)?;
            let service = CatalogService::new(session.connection());
            let id = service.add_item(&name, unit.map(UnitId::new), rate)?;
            println!("Added item {} (#{}) to {}", name.trim(), id, session.year());
            Ok(())
        }
        ItemCommands::List { year } => {
            let session = ctx.open_session(year)?;
            let items = CatalogService::new(session.connection()).list_items()?;
            if items.is_empty() {
                println!("No items in {}.", session.year());
                return Ok(());
            }
            for (item, unit_name) in items {
                match unit_name {
                    Some(unit) => println!("{:>4}  {}  {} per {}", item.id, item.name, item.rate, unit),
                    None => println!("{:>4}  {}  {}", item.id, item.name, item.rate),
                }
            }
            Ok(())
        }
    }
}
