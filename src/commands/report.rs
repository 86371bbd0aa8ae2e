//! Monthly report download command.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use clap::Args;

use redress_client::reports::ReportClient;
use redress_core::error::AppError;

use crate::output;

use super::Cli;

/// Arguments for the report command
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Report month 1-12 (defaults to the current month)
    #[arg(short, long)]
    pub month: Option<u32>,
    /// Report year (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,
    /// Output path (defaults to the suggested file name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Download the monthly PDF report
pub async fn execute(args: &ReportArgs, cli: &Cli) -> Result<(), AppError> {
    let ctx = super::connect(cli).await?;
    super::require_session(&ctx)?;

    let now = Utc::now();
    let month = args.month.unwrap_or_else(|| now.month());
    let year = args.year.unwrap_or_else(|| now.year());

    let report = ReportClient::new(Arc::clone(&ctx.api))
        .download_monthly(month, year)
        .await?;

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&report.file_name));
    tokio::fs::write(&path, &report.bytes).await?;

    output::print_success(&format!(
        "Report saved to {} ({} bytes)",
        path.display(),
        report.bytes.len()
    ));
    Ok(())
}
