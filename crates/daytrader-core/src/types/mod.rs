//! Core data types for the daytrader toolkit.

mod ohlcv;
mod timeframe;
mod value;

pub use ohlcv::{Bar, PriceHistory};
pub use timeframe::Timeframe;
pub use value::{IndicatorValue, Unavailable};
