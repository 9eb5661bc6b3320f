//! Shared reqwest plumbing.

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::SourceError;

/// Default request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build an async client with the given timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("orbtrack/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SourceError::Http(format!("Failed to create HTTP client: {}", e)))
}

/// GET `url` and decode the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, SourceError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SourceError::Http(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| SourceError::Http(format!("Failed to read response: {}", e)))?;

    decode_json(&body)
}

/// Decode a JSON body.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, SourceError> {
    serde_json::from_slice(body).map_err(|e| SourceError::Decode(e.to_string()))
}
