//! CSV price history source for offline analysis.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use daytrader_core::error::DataError;
use daytrader_core::traits::MarketDataProvider;
use daytrader_core::types::{Bar, PriceHistory, Timeframe};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "Datetime",
        alias = "date",
        alias = "timestamp",
        alias = "Timestamp"
    )]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", default)]
    close: Option<f64>,
    /// Used only when the file has no plain close column
    #[serde(rename = "Adj Close", alias = "adj_close", default)]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// Price history stored in a CSV file, one symbol per file.
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("price file not found: {}", path.display()),
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Load every bar in the file.
    pub fn load(&self, symbol: &str, timeframe: Timeframe) -> Result<PriceHistory, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| DataError::Parse(e.to_string()))?;

        let mut bars = Vec::new();
        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::Parse(e.to_string()))?;
            let timestamp = parse_timestamp(&record.date)?;
            let close = record.close.or(record.adj_close).ok_or_else(|| {
                DataError::Parse(format!("no close price for {}", record.date))
            })?;
            bars.push(Bar::new(
                timestamp,
                record.open,
                record.high,
                record.low,
                close,
                record.volume,
            ));
        }

        debug!(path = %self.path.display(), bars = bars.len(), "Loaded CSV history");
        Ok(PriceHistory::from_bars(symbol, timeframe, bars))
    }
}

#[async_trait]
impl MarketDataProvider for CsvDataSource {
    async fn get_historical_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceHistory, DataError> {
        let all = self.load(symbol, timeframe)?;
        let bars: Vec<Bar> = all
            .iter()
            .filter(|b| {
                let t = b.datetime();
                t >= start && t <= end
            })
            .copied()
            .collect();

        if bars.is_empty() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(PriceHistory::from_bars(symbol, timeframe, bars))
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.timestamp_millis());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    // Unix timestamp, milliseconds if more than 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        return Ok(if ts > 10_000_000_000 { ts } else { ts * 1000 });
    }

    Err(DataError::Parse(format!("Could not parse date: {date_str}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("2024-01-15").unwrap(), 1_705_276_800_000);
        assert_eq!(
            parse_timestamp("2024-01-15 10:30:00").unwrap(),
            1_705_276_800_000 + 37_800_000
        );
        assert_eq!(
            parse_timestamp("2024-01-15 11:30:00+01:00").unwrap(),
            1_705_276_800_000 + 37_800_000
        );
        assert_eq!(parse_timestamp("15.01.2024").unwrap(), 1_705_276_800_000);
        assert_eq!(parse_timestamp("1705312800000").unwrap(), 1_705_312_800_000);
        assert_eq!(parse_timestamp("1705312800").unwrap(), 1_705_312_800_000);
        assert!(parse_timestamp("yesterday").is_err());
    }

    fn write_csv() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Open,High,Low,Close,Volume").unwrap();
        writeln!(file, "2024-01-17,12,13,11,12.5,300").unwrap();
        writeln!(file, "2024-01-15,10,11,9,10.5,100").unwrap();
        writeln!(file, "2024-01-16,11,12,10,11.5,200").unwrap();
        file
    }

    #[test]
    fn test_load_sorts_bars() {
        let file = write_csv();
        let history = CsvDataSource::new(file.path())
            .unwrap()
            .load("BA", Timeframe::Daily)
            .unwrap();

        assert_eq!(history.closes(), vec![10.5, 11.5, 12.5]);
        assert_eq!(history.symbol, "BA");
    }

    #[tokio::test]
    async fn test_provider_filters_window() {
        let file = write_csv();
        let source = CsvDataSource::new(file.path()).unwrap();

        let start = DateTime::parse_from_rfc3339("2024-01-16T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let end = DateTime::parse_from_rfc3339("2024-01-31T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let history = source
            .get_historical_bars("BA", Timeframe::Daily, start, end)
            .await
            .unwrap();
        assert_eq!(history.len(), 2);

        let err = source
            .get_historical_bars("BA", Timeframe::Daily, end, end)
            .await
            .unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_missing_file() {
        let err = CsvDataSource::new("/nonexistent/bars.csv").err().unwrap();
        assert!(matches!(err, DataError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
        assert!(!err.is_no_data());
    }

    #[test]
    fn test_yahoo_export_prefers_close() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Open,High,Low,Close,Adj Close,Volume").unwrap();
        writeln!(file, "2024-01-15,10,11,9,10.5,10.4,100").unwrap();

        let history = CsvDataSource::new(file.path())
            .unwrap()
            .load("BA", Timeframe::Daily)
            .unwrap();
        assert_eq!(history.closes(), vec![10.5]);
    }

    #[test]
    fn test_adj_close_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Open,High,Low,Adj Close,Volume").unwrap();
        writeln!(file, "2024-01-15,10,11,9,10.4,100").unwrap();

        let history = CsvDataSource::new(file.path())
            .unwrap()
            .load("BA", Timeframe::Daily)
            .unwrap();
        assert_eq!(history.closes(), vec![10.4]);
    }
}
