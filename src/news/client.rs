//! HTTP client for the NewsAPI `everything` endpoint.

use std::fmt;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;

use crate::error::{PulseError, Result};
use crate::news::NewsSource;
use crate::news::article::{FetchOutcome, NewsRequest, NewsResponse};

/// Default endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Article search over HTTP.
#[derive(Clone)]
pub struct NewsApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl NewsApiClient {
    /// Create a client for `endpoint` authenticating with `api_key`.
    pub fn new<E, K>(endpoint: E, api_key: K, timeout: Duration) -> Result<Self>
    where
        E: Into<String>,
        K: Into<String>,
    {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PulseError::config("News API key is empty"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PulseError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(NewsApiClient {
            client,
            endpoint: endpoint.into(),
            api_key,
            timeout,
        })
    }

    /// The endpoint this client queries.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Decode a response body into a [`FetchOutcome`].
///
/// The API reports failures as JSON documents with a 4xx status, so the
/// body is decoded whatever the status; only an undecodable body is an
/// error.
pub fn interpret_response(body: &str) -> Result<FetchOutcome> {
    let payload: NewsResponse = serde_json::from_str(body)
        .map_err(|e| PulseError::transport(format!("Unreadable response from news API: {e}")))?;
    Ok(payload.into_outcome())
}

impl NewsSource for NewsApiClient {
    async fn fetch(&self, request: &NewsRequest) -> Result<FetchOutcome> {
        debug!(
            "Requesting articles for '{}' since {} from {}",
            request.query, request.from, self.endpoint
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&request.query_pairs())
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("News API answered {status} with {} bytes", body.len());

        let outcome = interpret_response(&body);
        if let Err(e) = &outcome {
            warn!("News API answered {status} with an unreadable body: {e}");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let client = NewsApiClient::new(DEFAULT_ENDPOINT, "secret-key-123", Duration::from_secs(5))
            .unwrap();
        let debug = format!("{client:?}");

        assert!(!debug.contains("secret-key-123"));
        assert!(debug.contains("<redacted>"));
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = NewsApiClient::new(DEFAULT_ENDPOINT, "  ", Duration::from_secs(5));
        assert!(matches!(result, Err(PulseError::Config(_))));
    }

    #[test]
    fn test_interpret_articles() {
        let body = r#"{"status":"ok","totalResults":1,"articles":[
            {"title":"Quantum leap","description":"Qubits","url":"https://example.com/q"}
        ]}"#;

        match interpret_response(body).unwrap() {
            FetchOutcome::Articles(articles) => {
                assert_eq!(articles.len(), 1);
                assert_eq!(articles[0].title, "Quantum leap");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_interpret_non_json() {
        let result = interpret_response("<html>Bad Gateway</html>");
        assert!(matches!(result, Err(PulseError::Transport(_))));
    }
}
