//! Yahoo Finance chart API provider.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use daytrader_core::error::DataError;
use daytrader_core::traits::MarketDataProvider;
use daytrader_core::types::{Bar, PriceHistory, Timeframe};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::http::{build_client, get_json};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

impl ChartError {
    fn message(&self) -> String {
        match (&self.code, &self.description) {
            (Some(code), Some(desc)) => format!("{code}: {desc}"),
            (Some(s), None) | (None, Some(s)) => s.clone(),
            (None, None) => "unknown provider error".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Option<ChartIndicators>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Market data from the Yahoo Finance chart endpoint.
pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    /// Create a provider against `base_url` (no trailing slash needed).
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, DataError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = build_client(timeout, user_agent)?;
        debug!(%base_url, "YahooProvider initialised");
        Ok(Self { client, base_url })
    }

    fn into_history(
        symbol: &str,
        timeframe: Timeframe,
        envelope: ChartEnvelope,
    ) -> Result<PriceHistory, DataError> {
        if let Some(err) = envelope.chart.error {
            return Err(DataError::Provider(err.message()));
        }

        let result = envelope
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or(DataError::NoDataAvailable)?;

        let timestamps = result.timestamp.unwrap_or_default();
        if timestamps.is_empty() {
            return Err(DataError::NoDataAvailable);
        }

        let quote = result
            .indicators
            .and_then(|i| i.quote.into_iter().next())
            .unwrap_or_default();

        let n = timestamps.len();
        if quote.close.len() != n {
            return Err(DataError::MalformedResponse(format!(
                "{} timestamps but {} closes",
                n,
                quote.close.len()
            )));
        }
        for (field, len) in [
            ("open", quote.open.len()),
            ("high", quote.high.len()),
            ("low", quote.low.len()),
            ("volume", quote.volume.len()),
        ] {
            if len != 0 && len != n {
                return Err(DataError::MalformedResponse(format!(
                    "{n} timestamps but {len} {field} values"
                )));
            }
        }

        let at = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();
        let bars: Vec<Bar> = timestamps
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                // A null close marks a gap in trading
                let close = at(&quote.close, i)?;
                Some(Bar::new(
                    ts * 1000,
                    at(&quote.open, i).unwrap_or(close),
                    at(&quote.high, i).unwrap_or(close),
                    at(&quote.low, i).unwrap_or(close),
                    close,
                    at(&quote.volume, i).unwrap_or(0.0),
                ))
            })
            .collect();

        if bars.is_empty() {
            return Err(DataError::NoDataAvailable);
        }

        let mut history = PriceHistory::from_bars(symbol, timeframe, bars);
        if let Some(currency) = result.meta.and_then(|m| m.currency) {
            history = history.with_currency(currency);
        }
        Ok(history)
    }
}

/// Chart endpoint for `symbol`, with the symbol encoded as one path segment.
fn chart_url(base_url: &str, symbol: &str) -> Result<Url, DataError> {
    let invalid = || DataError::Provider(format!("invalid base URL: {base_url}"));
    let mut url = Url::parse(base_url).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(["v8", "finance", "chart", symbol]);
    Ok(url)
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn get_historical_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceHistory, DataError> {
        let url = chart_url(&self.base_url, symbol)?;
        let query = [
            ("period1", start.timestamp().to_string()),
            ("period2", end.timestamp().to_string()),
            ("interval", timeframe.yahoo_interval().to_string()),
            ("includePrePost", "false".to_string()),
        ];

        let envelope: ChartEnvelope = get_json(&self.client, url.as_str(), &query, |body| {
            serde_json::from_str::<ChartEnvelope>(body)
                .ok()
                .and_then(|e| e.chart.error)
                .map(|e| e.message())
        })
        .await?;

        let history = Self::into_history(symbol, timeframe, envelope)?;
        debug!(symbol, interval = %timeframe, bars = history.len(), "Fetched chart");
        Ok(history)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

/// Fetch the most recent `lookback` of history, trying each interval in turn.
///
/// Returns the first non-empty history. When every interval fails the result
/// is `NoDataAvailable` if any attempt reported an empty window, otherwise
/// the last provider error.
pub async fn fetch_with_fallback(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    intervals: &[Timeframe],
    lookback: ChronoDuration,
) -> Result<PriceHistory, DataError> {
    let end = Utc::now();
    let start = end - lookback;

    let mut saw_empty = false;
    let mut last_error = None;

    for &interval in intervals {
        match provider
            .get_historical_bars(symbol, interval, start, end)
            .await
        {
            Ok(history) if !history.is_empty() => {
                info!(symbol, %interval, bars = history.len(), source = provider.name(), "Loaded history");
                return Ok(history);
            }
            Ok(_) => saw_empty = true,
            Err(e) if e.is_no_data() => {
                debug!(symbol, %interval, "No data for interval");
                saw_empty = true;
            }
            Err(e) => {
                warn!(symbol, %interval, error = %e, "Fetch failed");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !saw_empty => Err(e),
        _ => Err(DataError::NoDataAvailable),
    }
}
