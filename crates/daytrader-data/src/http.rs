//! Shared HTTP plumbing for the Yahoo endpoints.

use daytrader_core::error::DataError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> Result<Client, DataError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| DataError::Provider(format!("failed to build HTTP client: {e}")))
}

/// GET `url` and decode a JSON body.
///
/// Non-success statuses become `DataError::Provider` carrying the status and
/// whatever `describe` extracts from the body.
pub(crate) async fn get_json<T, F>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
    describe: F,
) -> Result<T, DataError>
where
    T: DeserializeOwned,
    F: FnOnce(&str) -> Option<String>,
{
    debug!(url, ?query, "GET");
    let resp = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| DataError::Provider(format!("request to {url} failed: {e}")))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| DataError::Provider(format!("reading response from {url} failed: {e}")))?;

    if !status.is_success() {
        let detail = describe(&body).unwrap_or_else(|| status.to_string());
        return Err(DataError::Provider(format!("HTTP {}: {}", status.as_u16(), detail)));
    }

    serde_json::from_str(&body).map_err(|e| DataError::MalformedResponse(e.to_string()))
}
