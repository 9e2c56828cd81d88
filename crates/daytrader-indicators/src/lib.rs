//! Technical indicators.
//!
//! This crate provides implementations of the indicators used by the
//! analysis pipeline:
//! - Moving averages (SMA, EMA with three seeding modes)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (Standard Deviation, Bollinger Bands)
//! - Volume indicators (VWAP)
//!
//! Batch `calculate` methods return raw series; the `latest` helpers wrap the
//! newest value in an `IndicatorValue` so callers never see NaN sentinels.

pub mod momentum;
pub mod moving_average;
pub mod volatility;
pub mod volume;

pub use momentum::{Macd, MacdOutput, Rsi, RsiSmoothing};
pub use moving_average::{ema_series, Ema, EmaSeed, Sma};
pub use volatility::{BollingerBands, BollingerOutput, StdDev};
pub use volume::Vwap;
