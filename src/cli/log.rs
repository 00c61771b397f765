//! Error log commands

use crate::cli::CliContext;
use crate::error::BillerResult;

/// Show the most recent entries from the error log
pub fn handle_log_command(ctx: &CliContext, count: usize) -> BillerResult<()> {
    let entries = ctx.logger().read_recent(count)?;
    if entries.is_empty() {
        println!("The error log is empty.");
        return Ok(());
    }
    for entry in entries {
        println!(
            "{}  [{}]  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            entry.component,
            entry.message
        );
    }
    Ok(())
}
