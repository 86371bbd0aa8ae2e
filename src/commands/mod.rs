//! CLI command definitions and dispatch.

pub mod auth;
pub mod grievance;
pub mod report;
pub mod stats;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use redress_auth::{FileSessionStore, HttpAuthGateway, MemorySessionStore, SessionController};
use redress_client::ApiClient;
use redress_core::config::ConsoleConfig;
use redress_core::error::AppError;
use redress_core::traits::SessionStore;
use redress_core::types::user::UserProfile;

use crate::output::OutputFormat;

/// Redress — grievance system administration console
#[derive(Debug, Parser)]
#[command(name = "redress", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Keep the session in memory only, never writing it to disk
    #[arg(long)]
    pub no_persist: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in as an administrator
    Login(auth::LoginArgs),
    /// Sign out and clear the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// Grievance management
    Grievance(grievance::GrievanceArgs),
    /// Grievance statistics
    Stats,
    /// Download the monthly report
    Report(report::ReportArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => auth::login(args, self).await,
            Commands::Logout => auth::logout(self).await,
            Commands::Whoami => auth::whoami(self).await,
            Commands::Grievance(args) => grievance::execute(args, self).await,
            Commands::Stats => stats::execute(self).await,
            Commands::Report(args) => report::execute(args, self).await,
        }
    }
}

/// Everything a command needs to talk to the backend.
pub struct ConsoleContext {
    pub api: Arc<ApiClient>,
    pub controller: SessionController,
}

/// Load config, build the transport and controller, and restore the
/// persisted session. Every command starts here.
pub async fn connect(cli: &Cli) -> Result<ConsoleContext, AppError> {
    let config = ConsoleConfig::load(&cli.config)?;
    let api = Arc::new(ApiClient::new(&config.api)?);
    let store: Arc<dyn SessionStore> = if cli.no_persist {
        Arc::new(MemorySessionStore::new())
    } else {
        Arc::new(FileSessionStore::open(&config.store.path).await?)
    };
    let gateway = Arc::new(HttpAuthGateway::new(Arc::clone(&api)));
    let controller = SessionController::new(gateway, store, api.bearer());

    controller.restore_session().await;

    Ok(ConsoleContext { api, controller })
}

/// Fail with a friendly message when the session is anonymous.
pub fn require_session(ctx: &ConsoleContext) -> Result<UserProfile, AppError> {
    ctx.controller
        .current()
        .profile()
        .cloned()
        .ok_or_else(|| AppError::authentication("Not signed in. Run `redress login` first."))
}
