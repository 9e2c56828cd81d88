//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Timeframe;

/// Compact OHLCV bar.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calculate the typical price (HLC average).
    #[inline]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Calculate the bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Multiply all prices by `rate`, leaving volume untouched.
    pub fn scaled(&self, rate: f64) -> Self {
        Self {
            open: self.open * rate,
            high: self.high * rate,
            low: self.low * rate,
            close: self.close * rate,
            ..*self
        }
    }
}

/// Price history for one symbol, ordered from oldest to newest.
///
/// An empty history is a valid value: it means the provider had nothing
/// for the requested window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Symbol identifier
    pub symbol: String,
    /// Timeframe of the bars
    pub timeframe: Timeframe,
    /// Currency the prices are quoted in, when known
    pub currency: Option<String>,
    bars: Vec<Bar>,
}

impl PriceHistory {
    /// Create a new empty history.
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            currency: None,
            bars: Vec::new(),
        }
    }

    /// Create a history from bars in any order. Bars are sorted by timestamp.
    pub fn from_bars(symbol: impl Into<String>, timeframe: Timeframe, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        Self {
            symbol: symbol.into(),
            timeframe,
            currency: None,
            bars,
        }
    }

    /// Set the quote currency.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Append a bar. Bars older than the current last bar are inserted in order.
    pub fn push(&mut self, bar: Bar) {
        match self.bars.last() {
            Some(last) if bar.timestamp < last.timestamp => {
                let idx = self.bars.partition_point(|b| b.timestamp <= bar.timestamp);
                self.bars.insert(idx, bar);
            }
            _ => self.bars.push(bar),
        }
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the history is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Timestamp of the newest bar.
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.last().map(Bar::datetime)
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Extract typical prices as a vector.
    pub fn typical_prices(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.typical_price()).collect()
    }

    /// Convert every price with a fixed multiplier and relabel the currency.
    pub fn scaled(&self, rate: f64, currency: Option<&str>) -> Self {
        Self {
            symbol: self.symbol.clone(),
            timeframe: self.timeframe,
            currency: currency.map(str::to_string).or_else(|| self.currency.clone()),
            bars: self.bars.iter().map(|b| b.scaled(rate)).collect(),
        }
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}
