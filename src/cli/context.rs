//! Shared state for commands: configuration, ticker table, provider.

use anyhow::{Context as _, Result};
use daytrader_analysis::{Analyzer, ScanRow, TechnicalSnapshot};
use daytrader_config::AppConfig;
use daytrader_core::error::DataError;
use daytrader_core::traits::MarketDataProvider;
use daytrader_core::types::{PriceHistory, Timeframe};
use daytrader_data::{
    fetch_with_fallback, Disambiguation, Resolution, TickerTable, YahooNews, YahooProvider,
};
use futures::future::join_all;
use std::io;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AppContext {
    pub config: AppConfig,
    pub table: TickerTable,
    pub analyzer: Analyzer,
    provider: Arc<dyn MarketDataProvider>,
}

impl AppContext {
    /// Build the context with the Yahoo provider.
    pub fn new(config: AppConfig) -> Result<Self> {
        let provider = YahooProvider::new(
            config.provider.base_url.clone(),
            config.provider.timeout(),
            &config.provider.user_agent,
        )
        .context("Failed to create market data provider")?;
        Self::with_provider(config, Arc::new(provider))
    }

    pub fn with_provider(config: AppConfig, provider: Arc<dyn MarketDataProvider>) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let table = match config.lookup.load_table() {
            Ok(table) => table,
            Err(DataError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    path = %config.lookup.ticker_db.display(),
                    error = %e,
                    "Ticker table unavailable, using overrides only"
                );
                TickerTable::default().with_overrides(config.lookup.effective_overrides())
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!(
                        "Failed to load ticker table {}",
                        config.lookup.ticker_db.display()
                    )
                })
            }
        };

        let analyzer = Analyzer::new(config.analysis.clone()).context("Invalid analysis settings")?;

        Ok(Self {
            config,
            table,
            analyzer,
            provider,
        })
    }

    pub fn news_provider(&self) -> Result<YahooNews> {
        YahooNews::new(
            self.config.news.base_url.clone(),
            self.config.provider.timeout(),
            &self.config.provider.user_agent,
        )
        .context("Failed to create news provider")
    }

    pub fn resolve(&self, query: &str, strategy: Disambiguation) -> Resolution {
        self.table.resolve(query, strategy)
    }

    /// Fetch history for a symbol, trying `intervals` (or the configured ones).
    pub async fn fetch(&self, symbol: &str, intervals: &[Timeframe]) -> Result<PriceHistory, DataError> {
        let intervals = if intervals.is_empty() {
            &self.config.provider.intervals
        } else {
            intervals
        };
        fetch_with_fallback(
            self.provider.as_ref(),
            symbol,
            intervals,
            self.config.provider.lookback(),
        )
        .await
    }

    pub async fn snapshot(
        &self,
        symbol: &str,
        intervals: &[Timeframe],
    ) -> Result<TechnicalSnapshot, DataError> {
        let history = self.fetch(symbol, intervals).await?;
        self.analyzer.analyze(&history)
    }

    /// Analyze every query without asking the user anything.
    ///
    /// Each query expands to its resolved symbols. Failures become rows, so
    /// one bad symbol never hides the others.
    pub async fn scan(&self, queries: &[String], strategy: Disambiguation) -> Vec<ScanRow> {
        let strategy = match strategy {
            Disambiguation::Prompt => Disambiguation::First,
            other => other,
        };

        let jobs: Vec<(String, String)> = queries
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .flat_map(|q| {
                self.resolve(q, strategy)
                    .symbols()
                    .into_iter()
                    .map(move |s| (q.to_string(), s))
            })
            .collect();

        let rows = join_all(jobs.iter().map(|(query, symbol)| self.scan_one(query, symbol))).await;
        info!(
            queries = queries.len(),
            symbols = rows.len(),
            ok = rows.iter().filter(|r| r.is_success()).count(),
            "Scan finished"
        );
        rows
    }

    async fn scan_one(&self, query: &str, symbol: &str) -> ScanRow {
        match self.snapshot(symbol, &[]).await {
            Ok(snapshot) => ScanRow::analyzed(query, &snapshot),
            Err(e) if e.is_no_data() => ScanRow::no_data(query, symbol),
            Err(e) => ScanRow::failed(query, Some(symbol.to_string()), e.to_string()),
        }
    }
}
