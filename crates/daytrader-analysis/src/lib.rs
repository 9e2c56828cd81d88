//! Technical analysis of a single price history.
//!
//! The [`Analyzer`] converts a history into the secondary currency, evaluates
//! every configured indicator and condenses the newest values into a
//! [`TechnicalSnapshot`] with qualitative labels.

mod report;
mod scan;
mod settings;
mod signals;
mod snapshot;

pub use scan::{render_table, ScanOutcome, ScanRow};
pub use settings::AnalysisSettings;
pub use signals::{Crossover, RsiZone, Trend};
pub use snapshot::{Analyzer, BandsReading, MacdReading, RsiReading, TechnicalSnapshot};
