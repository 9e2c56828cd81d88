//! Technical snapshot of one symbol.

use chrono::{DateTime, Utc};
use daytrader_core::error::{DataError, IndicatorError};
use daytrader_core::traits::Indicator;
use daytrader_core::types::{IndicatorValue, PriceHistory, Timeframe};
use daytrader_indicators::{BollingerBands, Ema, Macd, Rsi, Vwap};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::settings::AnalysisSettings;
use crate::signals::{Crossover, RsiZone, Trend};

/// RSI value with its zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiReading {
    pub value: f64,
    pub zone: RsiZone,
}

/// MACD lines with the crossover label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdReading {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub crossover: Crossover,
}

/// Bollinger envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandsReading {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Newest indicator values for one symbol, in the display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub currency: Option<String>,
    /// Time of the newest bar
    pub as_of: Option<DateTime<Utc>>,
    /// Number of bars analyzed
    pub bars: usize,
    /// Last close
    pub price: IndicatorValue<f64>,
    pub ema_fast: IndicatorValue<f64>,
    pub ema_slow: IndicatorValue<f64>,
    pub trend: Trend,
    pub rsi: IndicatorValue<RsiReading>,
    pub macd: IndicatorValue<MacdReading>,
    pub bollinger: IndicatorValue<BandsReading>,
    pub vwap: IndicatorValue<f64>,
}

impl TechnicalSnapshot {
    /// One-line verdict, e.g. `Bullish, RSI 63 (neutral)`.
    pub fn summary_line(&self) -> String {
        match self.rsi.value() {
            Some(rsi) => format!("{}, RSI {:.0} ({})", self.trend, rsi.value, rsi.zone),
            None => format!("{}, RSI n/a", self.trend),
        }
    }
}

/// Computes snapshots from price histories.
#[derive(Debug, Clone)]
pub struct Analyzer {
    settings: AnalysisSettings,
}

impl Analyzer {
    /// Create an analyzer after validating the settings.
    pub fn new(settings: AnalysisSettings) -> Result<Self, IndicatorError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Analyze a history.
    ///
    /// An empty history yields `DataError::NoDataAvailable` and nothing is
    /// computed. Otherwise every indicator resolves independently to a value
    /// or an `Unavailable` marker.
    pub fn analyze(&self, history: &PriceHistory) -> Result<TechnicalSnapshot, DataError> {
        if history.is_empty() {
            return Err(DataError::NoDataAvailable);
        }

        let s = &self.settings;
        let currency = (!s.currency.is_empty()).then_some(s.currency.as_str());
        let converted = history.scaled(s.fx_rate, currency);
        let closes = converted.closes();

        let price = converted
            .last()
            .map(|bar| IndicatorValue::from_f64(bar.close))
            .unwrap_or_else(|| IndicatorValue::insufficient(1, 0));

        let ema_fast = self.trend_ema(&closes, s.ema_fast);
        let ema_slow = self.trend_ema(&closes, s.ema_slow);
        let trend = Trend::from_emas(&ema_fast, &ema_slow);

        let rsi = Rsi::with_smoothing(s.rsi_period, s.rsi_smoothing)
            .latest(&closes)
            .map(|value| RsiReading {
                value,
                zone: RsiZone::classify(value, s.rsi_oversold, s.rsi_overbought),
            });

        let macd = Macd::with_periods(s.macd_fast, s.macd_slow, s.macd_signal)
            .latest(&closes)
            .map(|out| MacdReading {
                macd: out.macd,
                signal: out.signal,
                histogram: out.histogram,
                crossover: Crossover::from_lines(out.macd, out.signal),
            });

        let bollinger = BollingerBands::with_params(s.bollinger_period, s.bollinger_k)
            .latest(&closes)
            .map(|out| BandsReading {
                upper: out.upper,
                middle: out.middle,
                lower: out.lower,
            });

        let vwap = Vwap::new().latest(converted.bars());

        debug!(
            symbol = %history.symbol,
            bars = closes.len(),
            %trend,
            rsi = %rsi.map(|r| r.value).format(1),
            "Computed snapshot"
        );

        Ok(TechnicalSnapshot {
            symbol: converted.symbol.clone(),
            timeframe: converted.timeframe,
            currency: converted.currency.clone(),
            as_of: converted.latest_timestamp(),
            bars: closes.len(),
            price,
            ema_fast,
            ema_slow,
            trend,
            rsi,
            macd,
            bollinger,
            vwap,
        })
    }

    /// Trend EMA, reported only once `span` samples are available.
    fn trend_ema(&self, closes: &[f64], span: usize) -> IndicatorValue<f64> {
        if closes.len() < span {
            return IndicatorValue::insufficient(span, closes.len());
        }
        Ema::with_seed(span, self.settings.ema_seed).latest(closes)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            settings: AnalysisSettings::default(),
        }
    }
}
