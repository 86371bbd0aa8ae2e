//! Authentication CLI commands.

use clap::Args;

use redress_core::error::AppError;
use redress_core::types::session::SessionState;

use crate::output::{self, OutputFormat};

use super::Cli;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Administrator username (prompted when omitted)
    #[arg(short, long)]
    pub username: Option<String>,
}

/// Sign in as an administrator
pub async fn login(args: &LoginArgs, cli: &Cli) -> Result<(), AppError> {
    let ctx = super::connect(cli).await?;

    let username = match &args.username {
        Some(username) => username.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };
    let password: String = dialoguer::Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

    match ctx.controller.login(&username, &password).await {
        Ok(success) => {
            output::print_success(&success.message);
            output::print_kv("Signed in as", &success.profile.username);
            if let Some(features) = &success.profile.admin_features {
                output::print_kv("Manage users", &features.can_manage_users.to_string());
                output::print_kv(
                    "Manage grievances",
                    &features.can_manage_grievances.to_string(),
                );
                output::print_kv("View reports", &features.can_view_reports.to_string());
            }
            Ok(())
        }
        Err(failure) => {
            if let Some(remaining) = failure.remaining {
                output::print_kv("Attempts remaining", &remaining.to_string());
            }
            Err(AppError::authentication(failure.message()))
        }
    }
}

/// Sign out and clear the stored session
pub async fn logout(cli: &Cli) -> Result<(), AppError> {
    let ctx = super::connect(cli).await?;
    ctx.controller.logout().await;
    output::print_success("Signed out");
    Ok(())
}

/// Show the current session
pub async fn whoami(cli: &Cli) -> Result<(), AppError> {
    let ctx = super::connect(cli).await?;

    match ctx.controller.current() {
        SessionState::Authenticated { profile, .. } => {
            match cli.format {
                OutputFormat::Json => output::print_item(&profile, cli.format),
                OutputFormat::Table => {
                    output::print_kv("Username", &profile.username);
                    if let Some(full_name) = &profile.full_name {
                        output::print_kv("Name", full_name);
                    }
                    if let Some(email) = &profile.email {
                        output::print_kv("Email", email);
                    }
                    output::print_kv("Type", profile.user_type.as_str());
                    if let Some(last_login) = &profile.last_login {
                        output::print_kv(
                            "Last login",
                            &last_login.format("%Y-%m-%d %H:%M").to_string(),
                        );
                    }
                    if let Some(info) = &profile.security_info {
                        if let Some(expiry) = &info.token_expiry {
                            output::print_kv(
                                "Token expires",
                                &expiry.format("%Y-%m-%d %H:%M").to_string(),
                            );
                        }
                    }
                }
            }
            Ok(())
        }
        _ => {
            println!("Not signed in.");
            Ok(())
        }
    }
}
