//! Data sources: the ticker table, Yahoo Finance price history and news,
//! and CSV files for offline work.

mod csv_source;
mod http;
mod news;
mod tickers;
mod yahoo;

pub use csv_source::CsvDataSource;
pub use news::YahooNews;
pub use tickers::{
    Disambiguation, Resolution, ResolvedVia, SymbolOverrides, TickerEntry, TickerTable,
};
pub use yahoo::{fetch_with_fallback, YahooProvider, DEFAULT_BASE_URL};

use daytrader_core::error::DataError;
use daytrader_core::types::{PriceHistory, Timeframe};
use std::path::Path;

/// Load a whole CSV history file.
pub fn load_csv(
    path: impl AsRef<Path>,
    symbol: &str,
    timeframe: Timeframe,
) -> Result<PriceHistory, DataError> {
    CsvDataSource::new(path)?.load(symbol, timeframe)
}
