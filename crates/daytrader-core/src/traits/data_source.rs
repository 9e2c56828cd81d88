//! Market data and news provider traits.

use crate::error::DataError;
use crate::types::{PriceHistory, Timeframe};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news headline for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub link: String,
    pub publisher: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Trait for historical price data sources.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch historical bars.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `timeframe` - The bar timeframe
    /// * `start` - Start of the date range
    /// * `end` - End of the date range
    ///
    /// # Returns
    /// A history ordered from oldest to newest. `DataError::NoDataAvailable`
    /// when the provider has no bars for the request.
    async fn get_historical_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceHistory, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}

/// Trait for headline sources.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch at most `limit` recent headlines for a symbol, newest first.
    async fn latest_headlines(&self, symbol: &str, limit: usize)
        -> Result<Vec<Headline>, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;

    struct StaticProvider {
        bars: Vec<Bar>,
    }

    #[async_trait]
    impl MarketDataProvider for StaticProvider {
        async fn get_historical_bars(
            &self,
            symbol: &str,
            timeframe: Timeframe,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<PriceHistory, DataError> {
            let bars: Vec<Bar> = self
                .bars
                .iter()
                .filter(|b| b.datetime() >= start && b.datetime() <= end)
                .copied()
                .collect();
            if bars.is_empty() {
                return Err(DataError::NoDataAvailable);
            }
            Ok(PriceHistory::from_bars(symbol, timeframe, bars))
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    #[tokio::test]
    async fn test_provider_object_safety() {
        let provider: Box<dyn MarketDataProvider> = Box::new(StaticProvider {
            bars: vec![Bar::new(1_000, 1.0, 1.0, 1.0, 1.0, 1.0)],
        });

        let start = DateTime::from_timestamp_millis(0).unwrap();
        let end = DateTime::from_timestamp_millis(2_000).unwrap();
        let history = provider
            .get_historical_bars("X", Timeframe::Daily, start, end)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);

        let late = DateTime::from_timestamp_millis(5_000).unwrap();
        let err = provider
            .get_historical_bars("X", Timeframe::Daily, late, late)
            .await
            .unwrap_err();
        assert!(err.is_no_data());
    }
}
