//! CSV-backed journal file.

use csv::{ReaderBuilder, WriterBuilder};
use daytrader_core::error::JournalError;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::record::TradeRecord;

/// Append-only trade journal stored as CSV.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    /// Open a journal at `path`. The file is created on the first append.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header row if the file is new or empty.
    pub fn append(&self, record: &TradeRecord) -> Result<(), JournalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = WriterBuilder::new().has_headers(is_new).from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| JournalError::Csv(e.to_string()))?;
        writer.flush()?;

        debug!(path = %self.path.display(), symbol = %record.symbol, pnl = %record.pnl, "Appended trade");
        Ok(())
    }

    /// Load every record in file order. A missing file is an empty journal.
    pub fn load(&self) -> Result<Vec<TradeRecord>, JournalError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| JournalError::Csv(e.to_string()))?;

        reader
            .deserialize()
            .enumerate()
            .map(|(i, row)| {
                row.map_err(|e| JournalError::Csv(format!("row {}: {}", i + 2, e)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn records() -> Vec<TradeRecord> {
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        vec![
            TradeRecord::new(day(1), "RHM.DE", dec!(450.50), dec!(462.00), dec!(10))
                .unwrap()
                .with_setup("EMA crossover"),
            TradeRecord::new(day(4), "BA", dec!(200), dec!(190), dec!(-5))
                .unwrap()
                .with_note("short into earnings, \"tight\" stop"),
            TradeRecord::new(day(5), "NVO", dec!(101.25), dec!(99.75), dec!(20)).unwrap(),
        ]
    }

    #[test]
    fn test_append_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::open(dir.path().join("journal.csv"));

        for record in &records() {
            journal.append(record).unwrap();
        }

        assert_eq!(journal.load().unwrap(), records());
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::open(dir.path().join("journal.csv"));

        for record in &records() {
            journal.append(record).unwrap();
        }

        let content = fs::read_to_string(journal.path()).unwrap();
        assert_eq!(content.matches("entry_price").count(), 1);
        assert!(content.starts_with("date,symbol,entry_price,exit_price,quantity,pnl,setup,note"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::open(dir.path().join("nothing.csv"));
        assert!(journal.load().unwrap().is_empty());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::open(dir.path().join("a/b/journal.csv"));

        journal.append(&records()[0]).unwrap();
        assert_eq!(journal.load().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_row_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.csv");
        fs::write(
            &path,
            "date,symbol,entry_price,exit_price,quantity,pnl,setup,note\nnot-a-date,BA,1,2,3,3,,\n",
        )
        .unwrap();

        let err = Journal::open(&path).load().unwrap_err();
        assert!(matches!(err, JournalError::Csv(msg) if msg.starts_with("row 2")));
    }
}
