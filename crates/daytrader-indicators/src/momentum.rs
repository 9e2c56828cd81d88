//! Momentum indicators.

use daytrader_core::traits::{Indicator, MultiOutputIndicator};
use daytrader_core::types::{IndicatorValue, Unavailable};
use serde::{Deserialize, Serialize};

use crate::moving_average::{ema_series, EmaSeed};

/// How RSI averages gains and losses over the look-back window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSmoothing {
    /// Wilder's smoothing: SMA seed, then `(prev * (n - 1) + x) / n`.
    #[default]
    Wilder,
    /// Plain rolling mean of the last `n` gains and losses.
    Simple,
}

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
///
/// When the average loss is zero the RSI is 100 if there was any gain.
/// A window with neither gains nor losses has no RSI: batch output is NaN
/// and `latest` reports `Unavailable::DivisionByZero`.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    smoothing: RsiSmoothing,
}

impl Rsi {
    /// Create a new RSI indicator with Wilder smoothing.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        Self::with_smoothing(period, RsiSmoothing::Wilder)
    }

    /// Create an RSI with an explicit smoothing method.
    pub fn with_smoothing(period: usize, smoothing: RsiSmoothing) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period, smoothing }
    }

    /// Calculate using Wilder's smoothing method.
    fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
        if values.len() < period {
            return vec![];
        }

        let mut result = Vec::with_capacity(values.len() - period + 1);
        let period_f64 = period as f64;

        // Initial average
        let mut avg: f64 = values[..period].iter().sum::<f64>() / period_f64;
        result.push(avg);

        for &value in &values[period..] {
            avg = (avg * (period_f64 - 1.0) + value) / period_f64;
            result.push(avg);
        }

        result
    }

    fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
        // Each window is summed from scratch so a run of zeros averages to exactly 0.
        values
            .windows(period)
            .map(|w| w.iter().sum::<f64>() / period as f64)
            .collect()
    }

    /// Average gain and loss per output position.
    fn averages(&self, data: &[f64]) -> Vec<(f64, f64)> {
        if data.len() <= self.period {
            return vec![];
        }

        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for pair in data.windows(2) {
            let change = pair[1] - pair[0];
            gains.push(change.max(0.0));
            losses.push((-change).max(0.0));
        }

        let (avg_gains, avg_losses) = match self.smoothing {
            RsiSmoothing::Wilder => (
                Self::wilder_smooth(&gains, self.period),
                Self::wilder_smooth(&losses, self.period),
            ),
            RsiSmoothing::Simple => (
                Self::rolling_mean(&gains, self.period),
                Self::rolling_mean(&losses, self.period),
            ),
        };

        avg_gains.into_iter().zip(avg_losses).collect()
    }

    /// RSI from average gain and loss; `None` for a flat window.
    fn value(avg_gain: f64, avg_loss: f64) -> Option<f64> {
        if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                None
            } else {
                Some(100.0)
            }
        } else {
            Some(100.0 - (100.0 / (1.0 + avg_gain / avg_loss)))
        }
    }
}

impl Indicator for Rsi {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        self.averages(data)
            .into_iter()
            .map(|(gain, loss)| Self::value(gain, loss).unwrap_or(f64::NAN))
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }

    fn latest(&self, data: &[f64]) -> IndicatorValue<f64> {
        if data.len() < self.period() {
            return IndicatorValue::insufficient(self.period(), data.len());
        }
        match self.averages(data).last() {
            Some(&(gain, loss)) if gain.is_finite() && loss.is_finite() => {
                match Self::value(gain, loss) {
                    Some(rsi) => IndicatorValue::Available(rsi),
                    None => IndicatorValue::Unavailable(Unavailable::DivisionByZero),
                }
            }
            Some(_) => IndicatorValue::Unavailable(Unavailable::NonFinite),
            None => IndicatorValue::insufficient(self.period(), data.len()),
        }
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    seed: EmaSeed,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods. EMAs are seeded from the first sample.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
            seed: EmaSeed::First,
        }
    }

    /// Use a different EMA seeding for all three averages.
    pub fn with_seed(mut self, seed: EmaSeed) -> Self {
        self.seed = seed;
        self
    }

    /// The newest MACD reading.
    pub fn latest(&self, data: &[f64]) -> IndicatorValue<MacdOutput> {
        if data.len() < self.period() {
            return IndicatorValue::insufficient(self.period(), data.len());
        }
        match self.calculate(data).last() {
            Some(out) if out.macd.is_finite() && out.signal.is_finite() => {
                IndicatorValue::Available(*out)
            }
            Some(_) => IndicatorValue::Unavailable(Unavailable::NonFinite),
            None => IndicatorValue::insufficient(self.period(), data.len()),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the last `len` items of `values`.
fn tail(values: &[f64], len: usize) -> &[f64] {
    &values[values.len() - len..]
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        if data.len() < self.period() {
            return vec![];
        }

        let fast_ema = ema_series(data, self.fast_period, self.seed);
        let slow_ema = ema_series(data, self.slow_period, self.seed);

        // Align the EMAs on their newest values
        let len = fast_ema.len().min(slow_ema.len());
        let macd_line: Vec<f64> = tail(&fast_ema, len)
            .iter()
            .zip(tail(&slow_ema, len))
            .map(|(f, s)| f - s)
            .collect();

        let signal_line = ema_series(&macd_line, self.signal_period, self.seed);
        if signal_line.is_empty() {
            return vec![];
        }

        let len = signal_line.len();
        tail(&macd_line, len)
            .iter()
            .zip(signal_line.iter())
            .map(|(&macd, &signal)| MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect()
    }

    fn period(&self) -> usize {
        match self.seed {
            EmaSeed::Sma => self.slow_period + self.signal_period - 1,
            EmaSeed::First | EmaSeed::Adjusted => self.slow_period,
        }
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_basic() {
        let rsi = Rsi::new(14);
        // Generate test data with alternating up/down moves
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), 30 - 14);

        // All RSI values should be between 0 and 100
        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_bounded_for_both_smoothings() {
        let data: Vec<f64> = (0..60)
            .map(|i| 50.0 + (i as f64 * 0.7).cos() * 3.0 + i as f64 * 0.1)
            .collect();

        for smoothing in [RsiSmoothing::Wilder, RsiSmoothing::Simple] {
            let rsi = Rsi::with_smoothing(14, smoothing);
            for value in rsi.calculate(&data) {
                assert!((0.0..=100.0).contains(&value), "{smoothing:?}: {value}");
            }
        }
    }

    #[test]
    fn test_rsi_all_gains() {
        let rsi = Rsi::new(5);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        // No losses = RSI should be 100
        assert!((result[0] - 100.0).abs() < 1e-10);
        assert_eq!(rsi.latest(&data).into_option(), Some(100.0));
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        // All losses = RSI should be 0
        assert!(result[0].abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_window_is_unavailable() {
        let rsi = Rsi::with_smoothing(5, RsiSmoothing::Simple);
        let data = vec![10.0; 8];

        assert!(rsi.calculate(&data).iter().all(|v| v.is_nan()));
        assert_eq!(
            rsi.latest(&data).reason(),
            Some(Unavailable::DivisionByZero)
        );
    }

    #[test]
    fn test_rsi_simple_smoothing_reference() {
        // changes: +1, -1, +2, +1 ; window 4 -> gains 4/4, losses 1/4
        let rsi = Rsi::with_smoothing(4, RsiSmoothing::Simple);
        let data = vec![10.0, 11.0, 10.0, 12.0, 13.0];
        let value = rsi.latest(&data).into_option().unwrap();

        // RS = 1.0 / 0.25 = 4 -> RSI = 80
        assert!((value - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_wilder_reference() {
        // changes: +1, -1, +2, +1, -2 ; period 4
        // seed gains (1+0+2+1)/4 = 1, losses (0+1+0+0)/4 = 0.25
        // next: gain (1*3 + 0)/4 = 0.75, loss (0.25*3 + 2)/4 = 0.6875
        let rsi = Rsi::new(4);
        let data = vec![10.0, 11.0, 10.0, 12.0, 13.0, 11.0];
        let value = rsi.latest(&data).into_option().unwrap();

        let expected = 100.0 - 100.0 / (1.0 + 0.75 / 0.6875);
        assert!((value - expected).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_insufficient() {
        let rsi = Rsi::new(14);
        assert_eq!(
            rsi.latest(&[1.0; 14]).reason(),
            Some(Unavailable::InsufficientData {
                required: 15,
                available: 14
            })
        );
    }

    #[test]
    fn test_macd_basic() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = macd.calculate(&data);

        assert_eq!(result.len(), 50);
        // In an uptrend, MACD should be positive
        assert!(result.last().unwrap().macd > 0.0);
    }

    #[test]
    fn test_macd_histogram() {
        let macd = Macd::with_periods(5, 10, 3);
        let data: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64).sqrt()).collect();

        for out in macd.calculate(&data) {
            assert!((out.histogram - (out.macd - out.signal)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_macd_sma_seed_alignment() {
        let macd = Macd::with_periods(5, 10, 3).with_seed(EmaSeed::Sma);
        let data: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();

        // slow EMA has 21 values, signal EMA of those has 19
        assert_eq!(macd.calculate(&data).len(), 19);
        assert_eq!(macd.period(), 12);
        assert!(!macd.latest(&data[..11]).is_available());
        assert!(macd.latest(&data[..12]).is_available());
    }

    #[test]
    fn test_macd_insufficient() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..10).map(|i| i as f64).collect();

        assert!(macd.calculate(&data).is_empty());
        assert_eq!(
            macd.latest(&data).reason(),
            Some(Unavailable::InsufficientData {
                required: 26,
                available: 10
            })
        );
    }
}
