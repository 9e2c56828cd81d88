//! Core traits for the daytrader toolkit.

mod data_source;
mod indicator;

pub use data_source::{Headline, MarketDataProvider, NewsProvider};
pub use indicator::{Indicator, MultiOutputIndicator, OhlcvIndicator};
