//! Core types and traits for the daytrader toolkit.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, PriceHistory, Timeframe)
//! - The `IndicatorValue` result type shared by every indicator
//! - Error taxonomy for data, indicator and journal failures
//! - Core traits for indicators, market data and news providers

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, IndicatorError, JournalError};
pub use traits::*;
pub use types::*;
