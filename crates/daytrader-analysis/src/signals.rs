//! Qualitative labels derived from indicator values.

use daytrader_core::types::IndicatorValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend from the fast/slow EMA relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Bullish,
    Bearish,
    Sideways,
    /// One of the EMAs is unavailable.
    Unknown,
}

impl Trend {
    pub fn from_emas(fast: &IndicatorValue<f64>, slow: &IndicatorValue<f64>) -> Self {
        match (fast.value(), slow.value()) {
            (Some(f), Some(s)) if f > s => Trend::Bullish,
            (Some(f), Some(s)) if f < s => Trend::Bearish,
            (Some(_), Some(_)) => Trend::Sideways,
            _ => Trend::Unknown,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Bullish => "Bullish",
            Trend::Bearish => "Bearish",
            Trend::Sideways => "Sideways",
            Trend::Unknown => "Unknown",
        })
    }
}

/// RSI zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

impl RsiZone {
    /// Classify with strict comparisons: a value equal to a threshold is neutral.
    pub fn classify(rsi: f64, oversold: f64, overbought: f64) -> Self {
        if rsi < oversold {
            RsiZone::Oversold
        } else if rsi > overbought {
            RsiZone::Overbought
        } else {
            RsiZone::Neutral
        }
    }
}

impl fmt::Display for RsiZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RsiZone::Oversold => "oversold",
            RsiZone::Neutral => "neutral",
            RsiZone::Overbought => "overbought",
        })
    }
}

/// Relation of the MACD line to its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossover {
    Bullish,
    Bearish,
    Neutral,
}

impl Crossover {
    pub fn from_lines(macd: f64, signal: f64) -> Self {
        if macd > signal {
            Crossover::Bullish
        } else if macd < signal {
            Crossover::Bearish
        } else {
            Crossover::Neutral
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Crossover::Bullish => "bullish crossover",
            Crossover::Bearish => "bearish crossover",
            Crossover::Neutral => "neutral",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrader_core::types::Unavailable;

    #[test]
    fn test_trend_from_emas() {
        let a = IndicatorValue::Available(10.0);
        let b = IndicatorValue::Available(9.0);
        let missing = IndicatorValue::Unavailable(Unavailable::NonFinite);

        assert_eq!(Trend::from_emas(&a, &b), Trend::Bullish);
        assert_eq!(Trend::from_emas(&b, &a), Trend::Bearish);
        assert_eq!(Trend::from_emas(&a, &a), Trend::Sideways);
        assert_eq!(Trend::from_emas(&a, &missing), Trend::Unknown);
    }

    #[test]
    fn test_rsi_zone_boundaries() {
        assert_eq!(RsiZone::classify(29.9, 30.0, 70.0), RsiZone::Oversold);
        assert_eq!(RsiZone::classify(30.0, 30.0, 70.0), RsiZone::Neutral);
        assert_eq!(RsiZone::classify(70.0, 30.0, 70.0), RsiZone::Neutral);
        assert_eq!(RsiZone::classify(70.1, 30.0, 70.0), RsiZone::Overbought);
    }

    #[test]
    fn test_crossover_labels() {
        assert_eq!(Crossover::from_lines(1.0, 0.5).to_string(), "bullish crossover");
        assert_eq!(Crossover::from_lines(0.5, 1.0).to_string(), "bearish crossover");
        assert_eq!(Crossover::from_lines(1.0, 1.0).to_string(), "neutral");
    }
}
