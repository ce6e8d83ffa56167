//! Retrying JSON-over-HTTP client
//!
//! One attempt covers the whole exchange: send, status check, body read and
//! decode. A transport failure at any of those steps consumes one unit of the
//! retry budget.

use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("storefront-sync/", env!("CARGO_PKG_VERSION"));

/// Retry budget with capped exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Upper bound for any single delay
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Budget of `max_retries`, doubling from `initial_backoff` up to eight times it
    pub fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
            max_backoff: initial_backoff.saturating_mul(8),
        }
    }

    /// Delay before retry number `attempt` (zero-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_backoff)
    }
}

/// HTTP client bound to one base URL
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Build a client whose requests all carry `headers`
    pub(crate) fn new(
        base_url: impl Into<String>,
        headers: HeaderMap,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
            retry,
        })
    }

    /// POST `body` as JSON to `path` and decode the response body as `T`
    ///
    /// Retryable failures are retried with backoff until the budget runs out,
    /// then the last one is returned. Non-retryable statuses fail at once.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path);
        let mut attempt = 0;

        loop {
            match self.attempt(&url, body).await {
                Ok(value) => {
                    debug!("POST {} succeeded after {} attempt(s)", url, attempt + 1);
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.backoff(attempt);
                    warn!(
                        "Request failed ({}), attempt {}/{}, retrying in {:?}",
                        e,
                        attempt + 1,
                        self.retry.max_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::decode(format!("Response body is not valid JSON: {e}")))
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(e)
        }
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
