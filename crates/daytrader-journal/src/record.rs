//! Journal record.

use chrono::NaiveDate;
use daytrader_core::error::JournalError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A closed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    /// Negative for a short position
    pub quantity: Decimal,
    /// Realized profit or loss
    pub pnl: Decimal,
    /// Setup or strategy label
    #[serde(default)]
    pub setup: String,
    #[serde(default)]
    pub note: String,
}

impl TradeRecord {
    /// Create a record, computing P/L as `(exit - entry) * quantity`.
    pub fn new(
        date: NaiveDate,
        symbol: impl Into<String>,
        entry_price: Decimal,
        exit_price: Decimal,
        quantity: Decimal,
    ) -> Result<Self, JournalError> {
        let symbol = symbol.into().trim().to_uppercase();
        if symbol.is_empty() {
            return Err(JournalError::InvalidRecord("symbol is empty".into()));
        }
        if entry_price <= Decimal::ZERO || exit_price <= Decimal::ZERO {
            return Err(JournalError::InvalidRecord(
                "prices must be positive".into(),
            ));
        }
        if quantity.is_zero() {
            return Err(JournalError::InvalidRecord("quantity is zero".into()));
        }

        Ok(Self {
            date,
            symbol,
            entry_price,
            exit_price,
            quantity,
            pnl: (exit_price - entry_price) * quantity,
            setup: String::new(),
            note: String::new(),
        })
    }

    pub fn with_setup(mut self, setup: impl Into<String>) -> Self {
        self.setup = setup.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn is_short(&self) -> bool {
        self.quantity.is_sign_negative()
    }

    /// P/L relative to the capital at entry, in percent.
    pub fn return_pct(&self) -> Decimal {
        let cost = self.entry_price * self.quantity.abs();
        if cost.is_zero() {
            return Decimal::ZERO;
        }
        self.pnl / cost * Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_long_pnl() {
        let trade = TradeRecord::new(date(), "rhm.de", dec!(450.50), dec!(462.00), dec!(10)).unwrap();

        assert_eq!(trade.symbol, "RHM.DE");
        assert_eq!(trade.pnl, dec!(115.00));
        assert!(!trade.is_short());
    }

    #[test]
    fn test_short_pnl() {
        let trade = TradeRecord::new(date(), "BA", dec!(200), dec!(190), dec!(-5)).unwrap();

        assert_eq!(trade.pnl, dec!(50));
        assert!(trade.is_short());
        assert_eq!(trade.return_pct(), dec!(5));
    }

    #[test]
    fn test_invalid_records() {
        assert!(TradeRecord::new(date(), "  ", dec!(1), dec!(1), dec!(1)).is_err());
        assert!(TradeRecord::new(date(), "BA", dec!(0), dec!(1), dec!(1)).is_err());
        assert!(TradeRecord::new(date(), "BA", dec!(1), dec!(1), dec!(0)).is_err());
    }
}
