//! Timeframe definitions for market data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bar interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1 minute bars
    #[serde(rename = "1m")]
    Minute1,
    /// 5 minute bars
    #[serde(rename = "5m")]
    Minute5,
    /// 15 minute bars
    #[serde(rename = "15m")]
    Minute15,
    /// 30 minute bars
    #[serde(rename = "30m")]
    Minute30,
    /// 1 hour bars
    #[serde(rename = "1h")]
    Hour1,
    /// Daily bars
    #[serde(rename = "1d")]
    #[default]
    Daily,
    /// Weekly bars
    #[serde(rename = "1wk")]
    Weekly,
    /// Monthly bars
    #[serde(rename = "1mo")]
    Monthly,
}

impl Timeframe {
    /// Get the duration of the timeframe in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Timeframe::Minute1 => 60,
            Timeframe::Minute5 => 300,
            Timeframe::Minute15 => 900,
            Timeframe::Minute30 => 1800,
            Timeframe::Hour1 => 3600,
            Timeframe::Daily => 86400,
            Timeframe::Weekly => 604800,
            Timeframe::Monthly => 2592000, // Approximate (30 days)
        }
    }

    /// Check if this is an intraday timeframe.
    pub fn is_intraday(&self) -> bool {
        matches!(
            self,
            Timeframe::Minute1
                | Timeframe::Minute5
                | Timeframe::Minute15
                | Timeframe::Minute30
                | Timeframe::Hour1
        )
    }

    /// Interval parameter understood by the Yahoo chart endpoint.
    pub fn yahoo_interval(&self) -> &'static str {
        match self {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Daily => "1d",
            Timeframe::Weekly => "1wk",
            Timeframe::Monthly => "1mo",
        }
    }

    /// Get all available timeframes.
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Minute1,
            Timeframe::Minute5,
            Timeframe::Minute15,
            Timeframe::Minute30,
            Timeframe::Hour1,
            Timeframe::Daily,
            Timeframe::Weekly,
            Timeframe::Monthly,
        ]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.yahoo_interval())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" | "minute" => Ok(Timeframe::Minute1),
            "5m" | "5min" => Ok(Timeframe::Minute5),
            "15m" | "15min" => Ok(Timeframe::Minute15),
            "30m" | "30min" => Ok(Timeframe::Minute30),
            "1h" | "60m" | "1hour" | "hour" => Ok(Timeframe::Hour1),
            "1d" | "day" | "daily" => Ok(Timeframe::Daily),
            "1wk" | "1w" | "week" | "weekly" => Ok(Timeframe::Weekly),
            "1mo" | "month" | "monthly" => Ok(Timeframe::Monthly),
            _ => Err(format!("Invalid timeframe: {}", s)),
        }
    }
}
