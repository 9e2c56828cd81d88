//! Volume indicators.

use daytrader_core::traits::OhlcvIndicator;
use daytrader_core::types::{Bar, IndicatorValue, Unavailable};

/// Volume-Weighted Average Price.
///
/// Cumulative `typical_price * volume` divided by cumulative volume over the
/// whole series. Bars before any volume has traded have no VWAP (NaN).
#[derive(Debug, Clone, Default)]
pub struct Vwap;

impl Vwap {
    pub fn new() -> Self {
        Self
    }

    /// VWAP as of the last bar.
    pub fn latest(&self, bars: &[Bar]) -> IndicatorValue<f64> {
        if bars.is_empty() {
            return IndicatorValue::insufficient(1, 0);
        }
        match self.calculate_bars(bars).last() {
            Some(v) if v.is_nan() => IndicatorValue::Unavailable(Unavailable::DivisionByZero),
            Some(&v) => IndicatorValue::from_f64(v),
            None => IndicatorValue::insufficient(1, 0),
        }
    }
}

impl OhlcvIndicator for Vwap {
    fn calculate_bars(&self, bars: &[Bar]) -> Vec<f64> {
        let mut notional = 0.0;
        let mut volume = 0.0;

        bars.iter()
            .map(|bar| {
                notional += bar.typical_price() * bar.volume;
                volume += bar.volume;
                if volume > 0.0 {
                    notional / volume
                } else {
                    f64::NAN
                }
            })
            .collect()
    }

    fn name(&self) -> &str {
        "VWAP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vwap_cumulative() {
        let bars = vec![
            Bar::new(1, 10.0, 12.0, 9.0, 12.0, 100.0), // tp 11
            Bar::new(2, 12.0, 14.0, 11.0, 14.0, 300.0), // tp 13
        ];

        let values = Vwap::new().calculate_bars(&bars);
        assert!((values[0] - 11.0).abs() < 1e-10);
        // (11*100 + 13*300) / 400 = 12.5
        assert!((values[1] - 12.5).abs() < 1e-10);
    }

    #[test]
    fn test_vwap_bounded_by_typical_prices() {
        let bars: Vec<Bar> = (0..20)
            .map(|i| {
                let p = 50.0 + (i as f64 * 0.3).sin() * 4.0;
                Bar::new(i, p, p + 1.0, p - 1.0, p, 1000.0 + i as f64 * 10.0)
            })
            .collect();

        let vwap = Vwap::new().latest(&bars).into_option().unwrap();
        let min = bars.iter().map(Bar::typical_price).fold(f64::INFINITY, f64::min);
        let max = bars.iter().map(Bar::typical_price).fold(f64::NEG_INFINITY, f64::max);
        assert!(vwap >= min && vwap <= max);
    }

    #[test]
    fn test_vwap_zero_volume() {
        let bars = vec![Bar::new(1, 10.0, 10.0, 10.0, 10.0, 0.0)];
        assert_eq!(
            Vwap::new().latest(&bars).reason(),
            Some(Unavailable::DivisionByZero)
        );

        // Leading zero-volume bars do not poison later values
        let bars = vec![
            Bar::new(1, 10.0, 10.0, 10.0, 10.0, 0.0),
            Bar::new(2, 20.0, 20.0, 20.0, 20.0, 5.0),
        ];
        assert_eq!(Vwap::new().latest(&bars).into_option(), Some(20.0));
    }

    #[test]
    fn test_vwap_empty() {
        assert!(!Vwap::new().latest(&[]).is_available());
    }
}
