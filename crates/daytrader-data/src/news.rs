//! Headlines from the Yahoo Finance search endpoint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daytrader_core::error::DataError;
use daytrader_core::traits::{Headline, NewsProvider};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::http::{build_client, get_json};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<NewsItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsItem {
    title: Option<String>,
    link: Option<String>,
    publisher: Option<String>,
    provider_publish_time: Option<i64>,
}

impl NewsItem {
    fn into_headline(self) -> Option<Headline> {
        Some(Headline {
            title: self.title.filter(|t| !t.trim().is_empty())?,
            link: self.link.unwrap_or_default(),
            publisher: self.publisher,
            published_at: self
                .provider_publish_time
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        })
    }
}

/// Recent headlines per symbol.
pub struct YahooNews {
    client: Client,
    base_url: String,
}

impl YahooNews {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, DataError> {
        Ok(Self {
            client: build_client(timeout, user_agent)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl NewsProvider for YahooNews {
    async fn latest_headlines(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<Headline>, DataError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let url = format!("{}/v1/finance/search", self.base_url);
        let query = [
            ("q", symbol.to_string()),
            ("quotesCount", "0".to_string()),
            ("newsCount", limit.to_string()),
        ];
        let response: SearchResponse = get_json(&self.client, &url, &query, |_| None).await?;

        let mut headlines: Vec<Headline> = response
            .news
            .into_iter()
            .filter_map(NewsItem::into_headline)
            .collect();
        // Newest first; undated items keep their relative order at the end
        headlines.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        headlines.truncate(limit);

        debug!(symbol, count = headlines.len(), "Fetched headlines");
        Ok(headlines)
    }

    fn name(&self) -> &str {
        "yahoo-news"
    }
}
