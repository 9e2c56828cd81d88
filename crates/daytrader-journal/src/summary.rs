//! Aggregate statistics over journal records.

use rust_decimal::Decimal;
use std::fmt;

use crate::record::TradeRecord;

/// Journal statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalSummary {
    /// Total number of trades
    pub trades: usize,
    /// Trades with positive P/L
    pub winners: usize,
    /// Trades with negative P/L
    pub losers: usize,
    /// Winners as a percentage of all trades
    pub win_rate_pct: Decimal,
    pub total_pnl: Decimal,
    pub average_pnl: Decimal,
    /// Gross profit / gross loss
    pub profit_factor: Option<Decimal>,
    pub best_trade: Option<Decimal>,
    pub worst_trade: Option<Decimal>,
}

impl JournalSummary {
    pub fn from_records(records: &[TradeRecord]) -> Self {
        let mut winners = 0;
        let mut losers = 0;
        let mut gross_profit = Decimal::ZERO;
        let mut gross_loss = Decimal::ZERO;

        for pnl in records.iter().map(|r| r.pnl) {
            if pnl > Decimal::ZERO {
                winners += 1;
                gross_profit += pnl;
            } else if pnl < Decimal::ZERO {
                losers += 1;
                gross_loss += pnl.abs();
            }
        }

        let trades = records.len();
        let total_pnl = gross_profit - gross_loss;
        let (win_rate_pct, average_pnl) = if trades > 0 {
            (
                Decimal::from(winners * 100) / Decimal::from(trades),
                total_pnl / Decimal::from(trades),
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        Self {
            trades,
            winners,
            losers,
            win_rate_pct: win_rate_pct.round_dp(2),
            total_pnl,
            average_pnl: average_pnl.round_dp(2),
            profit_factor: (gross_loss > Decimal::ZERO)
                .then(|| (gross_profit / gross_loss).round_dp(2)),
            best_trade: records.iter().map(|r| r.pnl).max(),
            worst_trade: records.iter().map(|r| r.pnl).min(),
        }
    }
}

impl fmt::Display for JournalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |v: Option<Decimal>| v.map(|d| d.to_string()).unwrap_or_else(|| "-".into());

        writeln!(f, "Trades:        {}", self.trades)?;
        writeln!(f, "Winners:       {}", self.winners)?;
        writeln!(f, "Losers:        {}", self.losers)?;
        writeln!(f, "Win rate:      {}%", self.win_rate_pct)?;
        writeln!(f, "Total P/L:     {}", self.total_pnl)?;
        writeln!(f, "Average P/L:   {}", self.average_pnl)?;
        writeln!(f, "Profit factor: {}", opt(self.profit_factor))?;
        writeln!(f, "Best trade:    {}", opt(self.best_trade))?;
        write!(f, "Worst trade:   {}", opt(self.worst_trade))
    }
}

impl Default for JournalSummary {
    fn default() -> Self {
        Self::from_records(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn trade(entry: Decimal, exit: Decimal, qty: Decimal) -> TradeRecord {
        TradeRecord::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "BA", entry, exit, qty)
            .unwrap()
    }

    #[test]
    fn test_summary() {
        let records = vec![
            trade(dec!(100), dec!(110), dec!(10)), // +100
            trade(dec!(100), dec!(95), dec!(10)),  // -50
            trade(dec!(50), dec!(40), dec!(-3)),   // +30
            trade(dec!(20), dec!(20), dec!(1)),    // 0
        ];
        let summary = JournalSummary::from_records(&records);

        assert_eq!(summary.trades, 4);
        assert_eq!(summary.winners, 2);
        assert_eq!(summary.losers, 1);
        assert_eq!(summary.win_rate_pct, dec!(50));
        assert_eq!(summary.total_pnl, dec!(80));
        assert_eq!(summary.average_pnl, dec!(20));
        assert_eq!(summary.profit_factor, Some(dec!(2.6)));
        assert_eq!(summary.best_trade, Some(dec!(100)));
        assert_eq!(summary.worst_trade, Some(dec!(-50)));
    }

    #[test]
    fn test_empty_summary() {
        let summary = JournalSummary::default();

        assert_eq!(summary.trades, 0);
        assert_eq!(summary.win_rate_pct, Decimal::ZERO);
        assert!(summary.profit_factor.is_none());
        assert!(summary.to_string().contains("Best trade:    -"));
    }
}
