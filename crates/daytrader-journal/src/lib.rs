//! Trade journal: one CSV row per closed trade.

mod record;
mod store;
mod summary;

pub use record::TradeRecord;
pub use store::Journal;
pub use summary::JournalSummary;
