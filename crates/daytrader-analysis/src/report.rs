//! Multi-line text rendering of a snapshot.

use daytrader_core::types::Unavailable;
use std::fmt::Write;

use crate::snapshot::TechnicalSnapshot;

impl TechnicalSnapshot {
    /// Human-readable report with one indicator per line.
    ///
    /// Unavailable values print as `n/a` with the reason.
    pub fn report(&self) -> String {
        let currency = self.currency.as_deref().unwrap_or("");
        let mut out = String::new();

        let as_of = self
            .as_of
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{} ({}, {} bars, as of {})",
            self.symbol, self.timeframe, self.bars, as_of
        );
        let _ = writeln!(out, "  Price      {} {}", self.price.format(2), currency);
        let _ = writeln!(
            out,
            "  EMA fast   {}{}",
            self.ema_fast.format(2),
            reason(self.ema_fast.reason())
        );
        let _ = writeln!(
            out,
            "  EMA slow   {}{}",
            self.ema_slow.format(2),
            reason(self.ema_slow.reason())
        );
        let _ = writeln!(out, "  Trend      {}", self.trend);

        match self.rsi.value() {
            Some(rsi) => {
                let _ = writeln!(out, "  RSI        {:.1} ({})", rsi.value, rsi.zone);
            }
            None => {
                let _ = writeln!(out, "  RSI        n/a{}", reason(self.rsi.reason()));
            }
        }

        match self.macd.value() {
            Some(m) => {
                let _ = writeln!(
                    out,
                    "  MACD       {:.3} / signal {:.3} / hist {:.3} ({})",
                    m.macd, m.signal, m.histogram, m.crossover
                );
            }
            None => {
                let _ = writeln!(out, "  MACD       n/a{}", reason(self.macd.reason()));
            }
        }

        match self.bollinger.value() {
            Some(b) => {
                let _ = writeln!(
                    out,
                    "  Bollinger  {:.2} / {:.2} / {:.2}",
                    b.lower, b.middle, b.upper
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "  Bollinger  n/a{}",
                    reason(self.bollinger.reason())
                );
            }
        }

        let _ = writeln!(
            out,
            "  VWAP       {}{}",
            self.vwap.format(2),
            reason(self.vwap.reason())
        );
        let _ = write!(out, "  Summary    {}", self.summary_line());
        out
    }
}

fn reason(reason: Option<Unavailable>) -> String {
    match reason {
        Some(r) => format!(" ({r})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{AnalysisSettings, Analyzer};
    use daytrader_core::types::{Bar, PriceHistory, Timeframe};

    fn history(n: usize) -> PriceHistory {
        let bars = (0..n)
            .map(|i| {
                let c = 100.0 + (i as f64 * 0.5).sin() * 5.0;
                Bar::new(i as i64 * 3_600_000, c, c + 1.0, c - 1.0, c, 500.0)
            })
            .collect();
        PriceHistory::from_bars("RHM.DE", Timeframe::Hour1, bars)
    }

    #[test]
    fn test_report_lists_every_indicator() {
        let snapshot = Analyzer::default().analyze(&history(60)).unwrap();
        let report = snapshot.report();

        assert!(report.starts_with("RHM.DE (1h, 60 bars"));
        for label in ["Price", "EMA fast", "EMA slow", "Trend", "RSI", "MACD", "Bollinger", "VWAP"] {
            assert!(report.contains(label), "missing {label}");
        }
        assert!(report.contains("EUR"));
        assert!(!report.contains("n/a"));
    }

    #[test]
    fn test_report_shows_reasons() {
        let analyzer = Analyzer::new(AnalysisSettings::without_conversion()).unwrap();
        let report = analyzer.analyze(&history(4)).unwrap().report();

        assert!(report.contains("n/a (insufficient data (4/20))"));
        assert!(report.contains("Trend      Unknown"));
    }
}
