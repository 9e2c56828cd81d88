//! Volatility indicators.

use daytrader_core::traits::{Indicator, MultiOutputIndicator};
use daytrader_core::types::{IndicatorValue, Unavailable};
use serde::{Deserialize, Serialize};

/// Mean and standard deviation of one window.
fn window_stats(window: &[f64], sample: bool) -> (f64, f64) {
    let n = window.len() as f64;
    let mean: f64 = window.iter().sum::<f64>() / n;
    let divisor = if sample { n - 1.0 } else { n };
    let variance: f64 = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / divisor;
    (mean, variance.sqrt())
}

/// Standard Deviation.
#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
    sample: bool,
}

impl StdDev {
    /// Create a population standard deviation indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self {
            period,
            sample: false,
        }
    }

    /// Create a sample (n - 1) standard deviation indicator.
    pub fn sample(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self {
            period,
            sample: true,
        }
    }
}

impl Indicator for StdDev {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        data.windows(self.period)
            .map(|window| window_stats(window, self.sample).1)
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
    /// Bandwidth ((upper - lower) / middle)
    pub bandwidth: f64,
    /// %B ((price - lower) / (upper - lower))
    pub percent_b: f64,
}

impl BollingerOutput {
    /// Check if price is above upper band.
    pub fn is_overbought(&self, price: f64) -> bool {
        price > self.upper
    }

    /// Check if price is below lower band.
    pub fn is_oversold(&self, price: f64) -> bool {
        price < self.lower
    }
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
    sample: bool,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0, sample std).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters, using the sample
    /// standard deviation.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
            sample: true,
        }
    }

    /// Use the population standard deviation instead.
    pub fn population(mut self) -> Self {
        self.sample = false;
        self
    }

    /// The newest band reading.
    pub fn latest(&self, data: &[f64]) -> IndicatorValue<BollingerOutput> {
        if data.len() < self.period {
            return IndicatorValue::insufficient(self.period, data.len());
        }
        match self.calculate(data).last() {
            Some(out) if out.upper.is_finite() && out.lower.is_finite() => {
                IndicatorValue::Available(*out)
            }
            Some(_) => IndicatorValue::Unavailable(Unavailable::NonFinite),
            None => IndicatorValue::insufficient(self.period, data.len()),
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BollingerOutput> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);

        for (i, window) in data.windows(self.period).enumerate() {
            let (mean, std_dev) = window_stats(window, self.sample);

            let upper = mean + self.std_dev_multiplier * std_dev;
            let lower = mean - self.std_dev_multiplier * std_dev;

            let bandwidth = if mean != 0.0 {
                (upper - lower) / mean
            } else {
                0.0
            };

            let price = data[self.period - 1 + i];
            let percent_b = if upper != lower {
                (price - lower) / (upper - lower)
            } else {
                0.5
            };

            result.push(BollingerOutput {
                upper,
                middle: mean,
                lower,
                bandwidth,
                percent_b,
            });
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}
