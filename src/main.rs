//! Redress console entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Cli;

use redress_core::config::ConsoleConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logging settings come from the same file the commands use; a broken
    // config falls back to defaults so the error itself gets reported.
    let config = ConsoleConfig::load(&cli.config).unwrap_or_default();
    init_logging(&config);

    if let Err(e) = cli.execute().await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_logging(config: &ConsoleConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
