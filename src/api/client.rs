//! HTTP client for the test-statistics endpoint.
//!
//! A single unauthenticated GET with optional `startDate`/`endDate` query
//! parameters (epoch milliseconds). Any non-2xx response or decode failure
//! surfaces as a [`FetchError`]; there is no automatic retry or backoff —
//! refresh is the polling tick or re-running the command.

use crate::models::{DateRange, Report};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors from fetching the statistics payload.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request exceeded the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The endpoint could not be reached.
    #[error("cannot connect to {0}")]
    Connect(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a valid statistics payload.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Any other transport failure.
    #[error("request failed: {0}")]
    Other(String),
}

/// Client for the statistics endpoint.
pub struct StatsClient {
    base_url: String,
    timeout_seconds: u64,
    http_client: reqwest::Client,
}

impl StatsClient {
    /// Create a client with the given base URL and request timeout.
    pub fn new(base_url: &str, timeout_seconds: u64) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_seconds,
            http_client,
        }
    }

    /// The endpoint base URL this client queries.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the statistics payload for an optional date window.
    pub async fn fetch_report(&self, range: Option<&DateRange>) -> Result<Report, FetchError> {
        let mut request = self.http_client.get(&self.base_url);
        if let Some(range) = range {
            request = request.query(&[
                ("startDate", range.start_ms.to_string()),
                ("endDate", range.end_ms.to_string()),
            ]);
        }

        debug!("Fetching statistics from {}", self.base_url);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_seconds)
            } else if e.is_connect() {
                FetchError::Connect(self.base_url.clone())
            } else {
                FetchError::Other(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        response
            .json::<Report>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = StatsClient::new("https://stats.example.com/test-statistics/", 30);
        assert_eq!(client.base_url(), "https://stats.example.com/test-statistics");
    }

    #[test]
    fn test_error_messages() {
        let err = FetchError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: unavailable");

        assert_eq!(
            FetchError::Timeout(30).to_string(),
            "request timed out after 30s"
        );
    }
}
