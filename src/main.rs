//! Day-trading analysis terminal.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::context::AppContext;
use cli::{Cli, Commands};
use daytrader_config::load_config;
use daytrader_monitor::setup_logging;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    // Setup logging
    let log_level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let json = cli.json_logs || config.logging.format == "json";
    let console = !matches!(cli.command, Commands::Dashboard(_));
    let _log_guard = setup_logging(&log_level, json, console, config.logging.file.as_deref())
        .context("Failed to set up logging")?;

    // Execute command
    match cli.command {
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, &config).await,
        Commands::Journal(command) => cli::commands::journal::run(command, &config).await,
        Commands::Lookup(args) => cli::commands::lookup::run(args, &AppContext::new(config)?).await,
        Commands::Analyze(args) => {
            cli::commands::analyze::run(args, &AppContext::new(config)?).await
        }
        Commands::Scan(args) => cli::commands::scan::run(args, &AppContext::new(config)?).await,
        Commands::News(args) => cli::commands::news::run(args, &AppContext::new(config)?).await,
        Commands::Dashboard(args) => {
            cli::commands::dashboard::run(args, Arc::new(AppContext::new(config)?)).await
        }
    }
}
