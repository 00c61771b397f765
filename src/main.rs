use anyhow::Result;
use clap::{Parser, Subcommand};

use biller::cli::{
    handle_balance_command, handle_customer_command, handle_firm_command, handle_invoice_command,
    handle_item_command, handle_log_command, handle_payment_command, handle_unit_command,
    handle_year_command, CliContext, CustomerCommands, FirmCommands, InvoiceCommands, ItemCommands,
    PaymentCommands, UnitCommands, YearCommands,
};
use biller::config::{BillerPaths, Settings};

#[derive(Parser)]
#[command(
    name = "biller",
    version,
    about = "Billing and customer ledger for a small trading firm",
    long_about = "biller keeps each financial year in its own database file and \
                  records customers, items, invoices and payments against it. At \
                  year end a rollover carries the catalog and customer balances \
                  forward into the next year's file."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Financial year management commands
    #[command(subcommand, alias = "fy")]
    Year(YearCommands),

    /// Customer management commands
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Compute a customer's balance
    Balance {
        /// Customer ID
        customer_id: i64,
        /// Count only activity on or before this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
        /// Financial year to read from (default: latest)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Firm detail commands
    #[command(subcommand)]
    Firm(FirmCommands),

    /// Unit of measurement commands
    #[command(subcommand)]
    Unit(UnitCommands),

    /// Item catalog commands
    #[command(subcommand)]
    Item(ItemCommands),

    /// Invoice entry commands
    #[command(subcommand, alias = "bill")]
    Invoice(InvoiceCommands),

    /// Payment entry commands
    #[command(subcommand)]
    Payment(PaymentCommands),

    /// Show recent entries from the error log
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BillerPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;
    let ctx = CliContext::new(paths, settings);

    if let Err(e) = run(&ctx, cli.command) {
        // Best effort: the log itself may be what failed
        let _ = ctx.logger().log("cli", &e.to_string());
        return Err(e.into());
    }
    Ok(())
}

fn run(ctx: &CliContext, command: Option<Commands>) -> biller::BillerResult<()> {
    match command {
        Some(Commands::Year(cmd)) => handle_year_command(ctx, cmd),
        Some(Commands::Customer(cmd)) => handle_customer_command(ctx, cmd),
        Some(Commands::Balance {
            customer_id,
            as_of,
            year,
        }) => handle_balance_command(ctx, customer_id, as_of, year),
        Some(Commands::Firm(cmd)) => handle_firm_command(ctx, cmd),
        Some(Commands::Unit(cmd)) => handle_unit_command(ctx, cmd),
        Some(Commands::Item(cmd)) => handle_item_command(ctx, cmd),
        Some(Commands::Invoice(cmd)) => handle_invoice_command(ctx, cmd),
        Some(Commands::Payment(cmd)) => handle_payment_command(ctx, cmd),
        Some(Commands::Log { count }) => handle_log_command(ctx, count),
        Some(Commands::Config) => {
            println!("biller configuration");
            println!("====================");
            println!("Base directory: {}", ctx.paths.base_dir().display());
            println!(
                "Data directory: {}",
                ctx.settings.data_dir(&ctx.paths).display()
            );
            println!("Settings file:  {}", ctx.paths.settings_file().display());
            println!("Error log:      {}", ctx.paths.error_log().display());
            Ok(())
        }
        None => {
            println!("biller - billing and customer ledger");
            println!();
            println!("Run 'biller --help' for usage information.");
            println!("Run 'biller year create <YEAR>' to start a financial year.");
            Ok(())
        }
    }
}
