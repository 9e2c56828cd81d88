//! Results of analyzing several symbols in one pass.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::signals::Trend;
use crate::snapshot::TechnicalSnapshot;

/// What happened to one symbol of a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum ScanOutcome {
    /// Trend label and summary line of the snapshot
    Analyzed { trend: Trend, summary: String },
    /// The provider returned no bars for any interval
    NoData,
    /// Lookup or fetch failed
    Failed(String),
}

/// One line of a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRow {
    /// What the user typed
    pub query: String,
    /// Resolved symbol, if resolution got that far
    pub symbol: Option<String>,
    /// Last price in the display currency
    pub price: Option<f64>,
    pub outcome: ScanOutcome,
}

impl ScanRow {
    pub fn analyzed(query: impl Into<String>, snapshot: &TechnicalSnapshot) -> Self {
        Self {
            query: query.into(),
            symbol: Some(snapshot.symbol.clone()),
            price: snapshot.price.into_option(),
            outcome: ScanOutcome::Analyzed {
                trend: snapshot.trend,
                summary: snapshot.summary_line(),
            },
        }
    }

    pub fn no_data(query: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            symbol: Some(symbol.into()),
            price: None,
            outcome: ScanOutcome::NoData,
        }
    }

    pub fn failed(
        query: impl Into<String>,
        symbol: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            symbol,
            price: None,
            outcome: ScanOutcome::Failed(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ScanOutcome::Analyzed { .. })
    }

    /// Text of the analysis column.
    pub fn analysis_text(&self) -> String {
        match &self.outcome {
            ScanOutcome::Analyzed { summary, .. } => summary.clone(),
            ScanOutcome::NoData => "no data".to_string(),
            ScanOutcome::Failed(msg) => format!("error: {msg}"),
        }
    }

    /// Trend of an analyzed row.
    pub fn trend(&self) -> Option<Trend> {
        match self.outcome {
            ScanOutcome::Analyzed { trend, .. } => Some(trend),
            _ => None,
        }
    }

    pub fn price_text(&self) -> String {
        self.price
            .map(|p| format!("{p:.2}"))
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Render scan rows as a fixed-width table.
pub fn render_table(rows: &[ScanRow]) -> String {
    let symbol_width = rows
        .iter()
        .map(|r| r.symbol.as_deref().unwrap_or(&r.query).len())
        .max()
        .unwrap_or(0)
        .max("Ticker".len());
    let price_width = rows
        .iter()
        .map(|r| r.price_text().len())
        .max()
        .unwrap_or(0)
        .max("Price".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<sw$}  {:>pw$}  Analysis",
        "Ticker",
        "Price",
        sw = symbol_width,
        pw = price_width
    );
    let _ = writeln!(out, "{}", "-".repeat(symbol_width + price_width + 12));
    for row in rows {
        let _ = writeln!(
            out,
            "{:<sw$}  {:>pw$}  {}",
            row.symbol.as_deref().unwrap_or(&row.query),
            row.price_text(),
            row.analysis_text(),
            sw = symbol_width,
            pw = price_width
        );
    }
    out
}
