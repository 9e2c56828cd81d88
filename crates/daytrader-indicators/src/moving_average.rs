//! Moving average indicators.

use daytrader_core::traits::Indicator;
use serde::{Deserialize, Serialize};

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// How the first EMA value is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmaSeed {
    /// Start from the SMA of the first `span` samples.
    Sma,
    /// Start from the first sample and recurse (`adjust=False` in pandas).
    First,
    /// Normalized weighted average of every sample seen so far
    /// (`adjust=True` in pandas).
    #[default]
    Adjusted,
}

/// Exponential moving average series for `span` with the given seed.
///
/// `Sma` seeding yields `len - span + 1` values; the other seeds yield one
/// value per input.
pub fn ema_series(data: &[f64], span: usize, seed: EmaSeed) -> Vec<f64> {
    if data.is_empty() || span == 0 {
        return vec![];
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;

    match seed {
        EmaSeed::Sma => {
            if data.len() < span {
                return vec![];
            }
            let mut result = Vec::with_capacity(data.len() - span + 1);
            let mut ema: f64 = data[..span].iter().sum::<f64>() / span as f64;
            result.push(ema);
            for &price in &data[span..] {
                ema = price * alpha + ema * decay;
                result.push(ema);
            }
            result
        }
        EmaSeed::First => {
            let mut result = Vec::with_capacity(data.len());
            let mut ema = data[0];
            result.push(ema);
            for &price in &data[1..] {
                ema = price * alpha + ema * decay;
                result.push(ema);
            }
            result
        }
        EmaSeed::Adjusted => {
            let mut result = Vec::with_capacity(data.len());
            let mut numerator = 0.0;
            let mut denominator = 0.0;
            for &price in data {
                numerator = price + decay * numerator;
                denominator = 1.0 + decay * denominator;
                result.push(numerator / denominator);
            }
            result
        }
    }
}

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay with
/// multiplier `2 / (span + 1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    seed: EmaSeed,
}

impl Ema {
    /// Create a new EMA seeded with the SMA of the first `span` values.
    pub fn new(span: usize) -> Self {
        Self::with_seed(span, EmaSeed::Sma)
    }

    /// Create an EMA with an explicit seeding mode.
    pub fn with_seed(span: usize, seed: EmaSeed) -> Self {
        assert!(span > 0, "Span must be greater than 0");
        Self { span, seed }
    }

    pub fn span(&self) -> usize {
        self.span
    }

    pub fn seed(&self) -> EmaSeed {
        self.seed
    }
}

impl Indicator for Ema {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        ema_series(data, self.span, self.seed)
    }

    fn period(&self) -> usize {
        match self.seed {
            EmaSeed::Sma => self.span,
            EmaSeed::First | EmaSeed::Adjusted => 1,
        }
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[1] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[2] - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let data = vec![1.0, 2.0, 3.0];

        assert!(sma.calculate(&data).is_empty());
        assert!(!sma.latest(&data).is_available());
    }

    #[test]
    fn test_ema_sma_seed() {
        let ema = Ema::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = ema.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-10); // Initial SMA
        // mult = 2/(3+1) = 0.5
        // result[1] = 4 * 0.5 + 2 * 0.5 = 3.0
        assert!((result[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_ema_first_seed() {
        let ema = Ema::with_seed(3, EmaSeed::First);
        let result = ema.calculate(&[2.0, 4.0, 8.0]);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-10);
        assert!((result[1] - 3.0).abs() < 1e-10); // 4*0.5 + 2*0.5
        assert!((result[2] - 5.5).abs() < 1e-10); // 8*0.5 + 3*0.5
    }

    #[test]
    fn test_ema_adjusted_seed() {
        let ema = Ema::with_seed(3, EmaSeed::Adjusted);
        let result = ema.calculate(&[2.0, 4.0, 8.0]);

        // weights 1, 0.5, 0.25 from newest to oldest
        assert!((result[0] - 2.0).abs() < 1e-10);
        assert!((result[1] - (4.0 + 0.5 * 2.0) / 1.5).abs() < 1e-10);
        assert!((result[2] - (8.0 + 0.5 * 4.0 + 0.25 * 2.0) / 1.75).abs() < 1e-10);
    }

    #[test]
    fn test_ema_constant_series() {
        let data = vec![7.0; 25];
        for seed in [EmaSeed::Sma, EmaSeed::First, EmaSeed::Adjusted] {
            let last = *ema_series(&data, 9, seed).last().unwrap();
            assert!((last - 7.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_ema_period_depends_on_seed() {
        assert_eq!(Ema::new(9).period(), 9);
        assert_eq!(Ema::with_seed(9, EmaSeed::Adjusted).period(), 1);
        assert!(Ema::with_seed(9, EmaSeed::First).latest(&[5.0]).is_available());
    }
}
