//! Indicator trait definitions.

use crate::error::IndicatorError;
use crate::types::{Bar, IndicatorValue};

/// Trait for technical indicators over a single numeric series.
///
/// Outputs are aligned to the end of the input: the last output belongs to
/// the last input sample.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically prices), oldest first
    ///
    /// # Returns
    /// A vector of indicator values, empty when there is not enough data
    fn calculate(&self, data: &[f64]) -> Vec<f64>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }

    /// The most recent value, or the reason there is none.
    fn latest(&self, data: &[f64]) -> IndicatorValue<f64> {
        if let Err(IndicatorError::InsufficientData { required, available }) =
            self.validate_data(data)
        {
            return IndicatorValue::insufficient(required, available);
        }
        match self.calculate(data).last() {
            Some(&v) => IndicatorValue::from_f64(v),
            None => IndicatorValue::insufficient(self.period(), data.len()),
        }
    }
}

/// Multi-output indicator (e.g., Bollinger Bands, MACD).
///
/// Some indicators produce multiple related values.
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Indicator that uses whole bars rather than one price column.
pub trait OhlcvIndicator: Send + Sync {
    /// Calculate indicator values from bars, one output per bar.
    fn calculate_bars(&self, bars: &[Bar]) -> Vec<f64>;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Unavailable;

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        fn calculate(&self, data: &[f64]) -> Vec<f64> {
            if data.len() < self.period {
                return vec![];
            }
            // Simple sum indicator for testing
            data.windows(self.period).map(|w| w.iter().sum()).collect()
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_indicator_validation() {
        let indicator = TestIndicator { period: 5 };

        assert!(indicator.validate_data(&[1.0, 2.0, 3.0]).is_err());
        assert!(indicator.validate_data(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_ok());
    }

    #[test]
    fn test_indicator_calculate() {
        let indicator = TestIndicator { period: 3 };
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = indicator.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 6.0).abs() < 0.001); // 1+2+3
        assert!((result[1] - 9.0).abs() < 0.001); // 2+3+4
        assert!((result[2] - 12.0).abs() < 0.001); // 3+4+5
    }

    #[test]
    fn test_latest() {
        let indicator = TestIndicator { period: 3 };

        assert_eq!(
            indicator.latest(&[1.0, 2.0, 3.0, 4.0]).into_option(),
            Some(9.0)
        );
        assert_eq!(
            indicator.latest(&[1.0]).reason(),
            Some(Unavailable::InsufficientData {
                required: 3,
                available: 1
            })
        );
        assert_eq!(
            indicator.latest(&[1.0, f64::NAN, 3.0]).reason(),
            Some(Unavailable::NonFinite)
        );
    }
}
