//! Storefront connection factory
//!
//! Builds an [`HttpClient`] bound to the versioned Storefront API route of a
//! single store, with the access token attached to every request.

use super::client::{HttpClient, RetryPolicy};
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;
use url::Url;

/// Storefront API version used for the base route
pub const API_VERSION: &str = "2023-01";

/// Header carrying the storefront access token
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Retry budget for transport-level failures
pub const TRANSPORT_RETRIES: u32 = 2;

/// Path of the GraphQL endpoint relative to the versioned base route
pub const GRAPHQL_PATH: &str = "graphql.json";

/// Everything needed to reach one store's Storefront API
#[derive(Debug, Clone)]
pub struct StorefrontEndpoint {
    /// Store root, e.g. `https://my-store.myshopify.com`
    pub store_url: String,
    /// Storefront access token
    pub token: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// API version segment
    pub api_version: String,
    /// Initial delay between transport retries
    pub retry_backoff: Duration,
}

impl StorefrontEndpoint {
    pub fn new(store_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        Self {
            store_url: store_url.into(),
            token: token.into(),
            timeout,
            api_version: API_VERSION.to_string(),
            retry_backoff: Duration::from_secs(1),
        }
    }

    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    #[must_use]
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Versioned API route under the store URL
    pub fn base_url(&self) -> Result<String> {
        let url = Url::parse(&self.store_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "storeUrl",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        let root = url.as_str().trim_end_matches('/');
        Ok(format!("{root}/api/{}", self.api_version))
    }
}

/// Create a Storefront client for the given endpoint
pub fn connect(endpoint: &StorefrontEndpoint) -> Result<HttpClient> {
    if endpoint.token.is_empty() {
        return Err(Error::missing_field("storefrontToken"));
    }

    let mut token = HeaderValue::from_str(&endpoint.token)
        .map_err(|e| Error::invalid_value("storefrontToken", e.to_string()))?;
    token.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_TOKEN_HEADER, token);

    HttpClient::new(
        endpoint.base_url()?,
        headers,
        endpoint.timeout,
        RetryPolicy::new(TRANSPORT_RETRIES, endpoint.retry_backoff),
    )
}
