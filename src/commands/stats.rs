//! Grievance statistics command.

use std::sync::Arc;

use redress_client::grievances::GrievanceClient;
use redress_core::error::AppError;

use crate::output::{self, OutputFormat};

use super::Cli;

/// Print the aggregate grievance counts
pub async fn execute(cli: &Cli) -> Result<(), AppError> {
    let ctx = super::connect(cli).await?;
    super::require_session(&ctx)?;

    let stats = GrievanceClient::new(Arc::clone(&ctx.api)).stats().await?;

    match cli.format {
        OutputFormat::Json => output::print_item(&stats, cli.format),
        OutputFormat::Table => {
            output::print_kv("Total", &stats.total_grievances.to_string());
            output::print_kv("Pending", &stats.pending.to_string());
            output::print_kv("In progress", &stats.in_progress.to_string());
            output::print_kv("Resolved", &stats.resolved.to_string());
            output::print_kv("Rejected", &stats.rejected.to_string());
        }
    }

    Ok(())
}
