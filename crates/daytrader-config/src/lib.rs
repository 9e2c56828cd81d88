//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, DashboardSettings, JournalSettings, LoggingConfig, LookupSettings,
    NewsSettings, ProviderSettings,
};

use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use thiserror::Error;

/// Environment variable prefix, e.g. `DAYTRADER__ANALYSIS__FX_RATE=1.0`.
pub const ENV_PREFIX: &str = "DAYTRADER";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Load configuration from file and environment.
///
/// A missing file is not an error: every section has defaults, and the
/// environment is still applied on top.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("provider.intervals")
                .with_list_parse_key("dashboard.watchlist"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Parse configuration from TOML text, without the environment.
pub fn parse_config(text: &str) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from_str(text, FileFormat::Toml))
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrader_core::types::Timeframe;
    use daytrader_data::Disambiguation;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
[analysis]
fx_rate = 1.0
rsi_smoothing = "simple"

[lookup]
disambiguation = "all"

[lookup.overrides]
"siemens energy" = "ENR.DE"
"#,
        )
        .unwrap();

        assert_eq!(config.analysis.fx_rate, 1.0);
        assert_eq!(config.analysis.ema_slow, 20);
        assert_eq!(config.lookup.disambiguation, Disambiguation::All);
        assert_eq!(
            config.lookup.effective_overrides().get("Siemens Energy"),
            Some("ENR.DE")
        );
        assert_eq!(config.provider.lookback_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/daytrader.toml")).unwrap();
        assert_eq!(config.news.count, 3);
        assert_eq!(
            config.provider.intervals,
            vec![Timeframe::Hour1, Timeframe::Daily]
        );
    }

    #[test]
    fn test_load_file_and_environment() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[provider]\nlookback_days = 10\n\n[news]\ncount = 5").unwrap();

        std::env::set_var("DAYTRADER__DASHBOARD__REFRESH_SECS", "15");
        let config = load_config(file.path());
        std::env::remove_var("DAYTRADER__DASHBOARD__REFRESH_SECS");
        let config = config.unwrap();

        assert_eq!(config.provider.lookback_days, 10);
        assert_eq!(config.news.count, 5);
        assert_eq!(config.dashboard.refresh_secs, 15);
    }

    #[test]
    fn test_partial_logging_section() {
        let config = parse_config("[logging]\nlevel = \"debug\"\n").unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.logging.file.is_none());
        assert_eq!(config.app.name, "daytrader");
    }

    #[test]
    fn test_environment_without_file() {
        std::env::set_var("DAYTRADER__LOGGING__LEVEL", "debug");
        let config = load_config(Path::new("/nonexistent/env-only.toml"));
        std::env::remove_var("DAYTRADER__LOGGING__LEVEL");
        let config = config.unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_shipped_default_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        let config = load_config(&path).unwrap();

        assert!(config.validate().is_ok());
        assert!((config.analysis.fx_rate - 0.92).abs() < 1e-12);
    }

    #[test]
    fn test_bad_value_is_load_error() {
        let err = parse_config("[provider]\ntimeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, SettingsError::Load(_)));
    }
}
