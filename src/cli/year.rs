//! Financial year commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::cli::{parse_date, CliContext};
use crate::error::{BillerError, BillerResult};
use crate::services::transfer_year_data;
use crate::storage::{compact_database, create_year_database, open_database};

#[derive(Subcommand)]
pub enum YearCommands {
    /// List all financial years, most recent first
    List,
    /// Create a new financial year database, carrying data forward from
    /// the previous year when one exists
    Create {
        /// Starting calendar year, e.g. 2024 for FY 2024-2025
        start_year: i32,
        /// Date the books open (default: April 1 of the starting year)
        #[arg(long)]
        books_start: Option<String>,
        /// Source year to carry data forward from (default: latest)
        #[arg(long)]
        from: Option<i32>,
        /// Create an empty year without carrying anything forward
        #[arg(long)]
        empty: bool,
    },
    /// Reclaim unused space in a year database
    Compact {
        /// Year to compact (default: latest)
        #[arg(long)]
        year: Option<i32>,
    },
}

pub fn handle_year_command(ctx: &CliContext, command: YearCommands) -> BillerResult<()> {
    match command {
        YearCommands::List => list_years(ctx),
        YearCommands::Create {
            start_year,
            books_start,
            from,
            empty,
        } => create_year(ctx, start_year, books_start, from, empty),
        YearCommands::Compact { year } => compact_year(ctx, year),
    }
}

fn list_years(ctx: &CliContext) -> BillerResult<()> {
    let years = ctx.registry().list()?;
    if years.is_empty() {
        println!("No financial years found. Create one with 'biller year create'.");
        return Ok(());
    }
    let current = years.first().map(|y| y.start_year);
    print!(
        "{}",
        crate::display::format_year_list(&years, current)
    );
    Ok(())
}

fn create_year(
    ctx: &CliContext,
    start_year: i32,
    books_start: Option<String>,
    from: Option<i32>,
    empty: bool,
) -> BillerResult<()> {
    let data_dir = ctx.settings.data_dir(&ctx.paths);
    std::fs::create_dir_all(&data_dir)
        .map_err(|e| BillerError::Io(format!("Failed to create data directory: {}", e)))?;

    let registry = ctx.registry();
    if registry.find(start_year)?.is_some() {
        return Err(BillerError::Validation(format!(
            "Financial year {}-{} already exists",
            start_year,
            start_year + 1
        )));
    }

    let books_start_date = match books_start {
        Some(s) => parse_date(&s)?,
        None => NaiveDate::from_ymd_opt(start_year, 4, 1).ok_or_else(|| {
            BillerError::Validation(format!("Invalid start year: {}", start_year))
        })?,
    };

    let source = if empty {
        None
    } else {
        match from {
            Some(year) => Some(registry.find(year)?.ok_or_else(|| {
                BillerError::year_not_found(year.to_string())
            })?),
            None => registry.latest()?,
        }
    };

    let target_path = data_dir.join(crate::config::BillerPaths::year_file_name(start_year));
    create_year_database(
        &target_path,
        &ctx.settings.password,
        start_year,
        books_start_date,
    )?;
    println!("Created financial year {}-{}", start_year, start_year + 1);

    if let Some(source_year) = source {
        let logger = ctx.logger();
        transfer_year_data(
            &source_year.file_path,
            &target_path,
            &ctx.settings.password,
            Some(&logger),
        )?;
        println!(
            "Carried forward firm details, items, customers and closing balances from {}",
            source_year
        );
    }
    Ok(())
}

fn compact_year(ctx: &CliContext, year: Option<i32>) -> BillerResult<()> {
    let year = ctx.resolve_year(year)?;
    let conn = open_database(&year.file_path, &ctx.settings.password)?;
    compact_database(&conn)?;
    println!("Compacted database for {}", year);
    Ok(())
}
