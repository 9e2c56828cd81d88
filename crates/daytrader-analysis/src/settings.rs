//! Analysis parameters.

use daytrader_core::error::IndicatorError;
use daytrader_indicators::{EmaSeed, RsiSmoothing};
use serde::{Deserialize, Serialize};

/// Parameters of the snapshot pipeline.
///
/// `fx_rate` is a static multiplier applied to every price before any
/// indicator runs; it is not a live exchange rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Price multiplier into the display currency
    pub fx_rate: f64,
    /// Display currency label
    pub currency: String,
    /// Fast trend EMA span
    pub ema_fast: usize,
    /// Slow trend EMA span
    pub ema_slow: usize,
    /// Seeding of the trend EMAs
    pub ema_seed: EmaSeed,
    pub rsi_period: usize,
    pub rsi_smoothing: RsiSmoothing,
    /// RSI below this is oversold
    pub rsi_oversold: f64,
    /// RSI above this is overbought
    pub rsi_overbought: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    /// Band width in standard deviations
    pub bollinger_k: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            fx_rate: 0.92,
            currency: "EUR".to_string(),
            ema_fast: 9,
            ema_slow: 20,
            ema_seed: EmaSeed::Adjusted,
            rsi_period: 14,
            rsi_smoothing: RsiSmoothing::Wilder,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_k: 2.0,
        }
    }
}

impl AnalysisSettings {
    /// Settings that leave prices in their quote currency.
    pub fn without_conversion() -> Self {
        Self {
            fx_rate: 1.0,
            currency: String::new(),
            ..Self::default()
        }
    }

    /// Validate the parameters.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if !(self.fx_rate.is_finite() && self.fx_rate > 0.0) {
            return Err(IndicatorError::InvalidParameter(
                "fx_rate must be a positive number".into(),
            ));
        }
        if self.ema_fast == 0 || self.ema_fast >= self.ema_slow {
            return Err(IndicatorError::InvalidParameter(
                "ema_fast must be positive and less than ema_slow".into(),
            ));
        }
        if self.rsi_period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "rsi_period must be greater than 0".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.rsi_oversold)
            || !(0.0..=100.0).contains(&self.rsi_overbought)
            || self.rsi_oversold >= self.rsi_overbought
        {
            return Err(IndicatorError::InvalidParameter(
                "RSI thresholds must satisfy 0 <= oversold < overbought <= 100".into(),
            ));
        }
        if self.macd_fast == 0 || self.macd_signal == 0 || self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidParameter(
                "MACD periods must be positive with fast < slow".into(),
            ));
        }
        if self.bollinger_period < 2 || !self.bollinger_k.is_finite() || self.bollinger_k <= 0.0 {
            return Err(IndicatorError::InvalidParameter(
                "Bollinger period must be at least 2 and k positive".into(),
            ));
        }
        Ok(())
    }
}
