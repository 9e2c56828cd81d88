//! Validate configuration command.

use anyhow::Result;
use daytrader_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: &Path, config: &AppConfig) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("File not found, showing defaults and environment overrides");
    }

    match config.validate() {
        Ok(()) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Ticker table: {}", config.lookup.ticker_db.display());
            println!(
                "Ticker table present: {}",
                if config.lookup.ticker_db.exists() { "yes" } else { "no" }
            );
            println!(
                "Conversion: x{} -> {}",
                config.analysis.fx_rate, config.analysis.currency
            );
            println!();
            println!("{}", config.to_toml()?);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
