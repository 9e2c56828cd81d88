//! Configuration structures.

use daytrader_analysis::AnalysisSettings;
use daytrader_core::types::Timeframe;
use daytrader_data::{Disambiguation, SymbolOverrides, TickerTable, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::SettingsError;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub news: NewsSettings,
    #[serde(default)]
    pub lookup: LookupSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub journal: JournalSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

impl AppConfig {
    /// Check cross-field consistency.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.analysis
            .validate()
            .map_err(|e| SettingsError::Invalid(format!("analysis: {e}")))?;

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(SettingsError::Invalid(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        if self.provider.timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "provider.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.provider.lookback_days == 0 {
            return Err(SettingsError::Invalid(
                "provider.lookback_days must be greater than 0".into(),
            ));
        }
        if self.provider.intervals.is_empty() {
            return Err(SettingsError::Invalid(
                "provider.intervals must list at least one interval".into(),
            ));
        }
        if self.news.count == 0 {
            return Err(SettingsError::Invalid("news.count must be greater than 0".into()));
        }
        if self.dashboard.refresh_secs == 0 {
            return Err(SettingsError::Invalid(
                "dashboard.refresh_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "daytrader".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Also write logs to this file
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Price history provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Length of the history window
    pub lookback_days: u32,
    /// Bar intervals to try in order until one has data
    pub intervals: Vec<Timeframe>,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn lookback(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.lookback_days))
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            user_agent: concat!("daytrader/", env!("CARGO_PKG_VERSION")).to_string(),
            lookback_days: 30,
            intervals: vec![Timeframe::Hour1, Timeframe::Daily],
        }
    }
}

/// Headline source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSettings {
    pub base_url: String,
    /// Headlines per symbol
    pub count: usize,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            count: 3,
        }
    }
}

/// Symbol lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// CSV ticker table
    pub ticker_db: PathBuf,
    pub disambiguation: Disambiguation,
    /// Start from the shipped override map
    pub builtin_overrides: bool,
    /// Additional name -> symbol overrides
    pub overrides: SymbolOverrides,
}

impl LookupSettings {
    /// Overrides in effect: the shipped map (if enabled) plus configured entries.
    pub fn effective_overrides(&self) -> SymbolOverrides {
        let mut overrides = if self.builtin_overrides {
            SymbolOverrides::builtin()
        } else {
            SymbolOverrides::default()
        };
        overrides.extend(&self.overrides);
        overrides
    }

    /// Load the ticker table with the effective overrides attached.
    pub fn load_table(&self) -> Result<TickerTable, daytrader_core::error::DataError> {
        Ok(TickerTable::load(&self.ticker_db)?.with_overrides(self.effective_overrides()))
    }
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            ticker_db: PathBuf::from("data/ticker_database.csv"),
            disambiguation: Disambiguation::First,
            builtin_overrides: true,
            overrides: SymbolOverrides::default(),
        }
    }
}

/// Trade journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalSettings {
    pub path: PathBuf,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/journal.csv"),
        }
    }
}

/// Terminal dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Seconds between data refreshes
    pub refresh_secs: u64,
    /// Queries shown when none are given on the command line
    pub watchlist: Vec<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_secs: 60,
            watchlist: vec!["rheinmetall".to_string(), "boeing".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inconsistent_values() {
        let mut config = AppConfig::default();
        config.analysis.ema_fast = 30;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.analysis.fx_rate = -1.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.provider.intervals.clear();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_overrides() {
        let mut lookup = LookupSettings::default();
        lookup.overrides.insert("Siemens Energy", "ENR.DE");

        let overrides = lookup.effective_overrides();
        assert_eq!(overrides.get("siemens energy"), Some("ENR.DE"));
        assert_eq!(overrides.get("boeing"), Some("BA"));

        lookup.builtin_overrides = false;
        assert_eq!(lookup.effective_overrides().len(), 1);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.provider.intervals, config.provider.intervals);
        assert_eq!(parsed.analysis, config.analysis);
    }
}
