//! Grievance management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use redress_client::grievances::{GrievanceClient, GrievanceFilter, GrievanceStatus};
use redress_core::error::AppError;

use crate::output;

use super::Cli;

/// Arguments for grievance commands
#[derive(Debug, Args)]
pub struct GrievanceArgs {
    /// Grievance subcommand
    #[command(subcommand)]
    pub command: GrievanceCommand,
}

/// Grievance subcommands
#[derive(Debug, Subcommand)]
pub enum GrievanceCommand {
    /// List grievances
    List {
        /// Filter by status (pending, in_progress, resolved, rejected)
        #[arg(short, long)]
        status: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by priority
        #[arg(short, long)]
        priority: Option<String>,
        /// Client-side search over subject, description, reporter, category
        #[arg(long)]
        search: Option<String>,
    },
    /// Update a grievance's status and resolution
    Update {
        /// Grievance ID
        id: String,
        /// New status
        status: GrievanceStatus,
        /// Resolution text (prompted when omitted)
        #[arg(short, long)]
        resolution: Option<String>,
    },
    /// Delete a grievance
    Delete {
        /// Grievance ID
        id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Grievance display row for table output
#[derive(Debug, Serialize, Tabled)]
struct GrievanceRow {
    /// Grievance ID
    id: String,
    /// Subject
    subject: String,
    /// Category
    category: String,
    /// Priority
    priority: String,
    /// Status
    status: String,
    /// Reporter
    reporter: String,
    /// Filed at
    created: String,
}

/// Execute grievance commands
pub async fn execute(args: &GrievanceArgs, cli: &Cli) -> Result<(), AppError> {
    let ctx = super::connect(cli).await?;
    super::require_session(&ctx)?;
    let client = GrievanceClient::new(Arc::clone(&ctx.api));

    match &args.command {
        GrievanceCommand::List {
            status,
            category,
            priority,
            search,
        } => {
            let filter = GrievanceFilter {
                status: status.clone(),
                category: category.clone(),
                priority: priority.clone(),
            };
            let records = client.list(&filter).await?;
            let query = search.as_deref().unwrap_or("");

            let rows: Vec<GrievanceRow> = records
                .iter()
                .filter(|g| g.matches_query(query))
                .map(|g| GrievanceRow {
                    id: g.id.clone(),
                    subject: g.subject.clone(),
                    category: g.category.to_string(),
                    priority: g.priority.to_string(),
                    status: g.status.to_string(),
                    reporter: g
                        .reporter
                        .as_ref()
                        .map(|r| r.display_name().to_string())
                        .unwrap_or_else(|| "unknown".to_string()),
                    created: g.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, cli.format);
        }
        GrievanceCommand::Update {
            id,
            status,
            resolution,
        } => {
            let resolution = match resolution {
                Some(resolution) => resolution.clone(),
                None => dialoguer::Input::new()
                    .with_prompt("Resolution")
                    .allow_empty(true)
                    .interact_text()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };

            client.update(id, *status, &resolution).await?;
            output::print_success(&format!("Grievance {} updated to {}", id, status));
        }
        GrievanceCommand::Delete { id, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete grievance {}? This action cannot be undone.",
                        id
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            client.delete(id).await?;
            output::print_success(&format!("Grievance {} deleted", id));
        }
    }

    Ok(())
}
