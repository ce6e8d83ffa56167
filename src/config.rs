//! Source configuration
//!
//! Options for one store, loaded from a YAML or JSON file or from inline JSON.
//! Keys are camelCase. [`SourceConfig::validate`] resolves the store URL and
//! produces a [`ResolvedConfig`] the rest of the crate works from.

use crate::engine::EngineConfig;
use crate::error::{Error, Result};
use crate::http::{StorefrontEndpoint, API_VERSION};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `storefrontToken`
pub const TOKEN_ENV_VAR: &str = "STOREFRONT_TOKEN";

// ============================================================================
// Source Config
// ============================================================================

/// Options for one store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    /// Store subdomain, expanded to `https://<name>.myshopify.com`
    #[serde(default)]
    pub store_name: String,

    /// Store root URL, used as-is when present
    #[serde(default)]
    pub store_url: String,

    /// Storefront access token
    #[serde(default)]
    pub storefront_token: String,

    /// Prefix for every node type name
    #[serde(default = "default_type_name")]
    pub type_name: String,

    /// Types to load (empty = all)
    #[serde(default)]
    pub types: Vec<String>,

    /// Page size sent as `first`
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Storefront API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Delay before each follow-up page in milliseconds
    #[serde(default = "default_page_backoff")]
    pub page_backoff: u64,
}

fn default_type_name() -> String {
    "Shopify".to_string()
}

fn default_per_page() -> u32 {
    100
}

fn default_timeout() -> u64 {
    60_000
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_page_backoff() -> u64 {
    1000
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            store_name: String::new(),
            store_url: String::new(),
            storefront_token: String::new(),
            type_name: default_type_name(),
            types: Vec::new(),
            per_page: default_per_page(),
            timeout: default_timeout(),
            api_version: default_api_version(),
            page_backoff: default_page_backoff(),
        }
    }
}

impl SourceConfig {
    /// Load from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content)
    }

    /// Parse from YAML (JSON is accepted too)
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse from inline JSON
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Replace the token when `token` is non-empty
    #[must_use]
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.none_if_empty() {
            self.storefront_token = token;
        }
        self
    }

    /// Apply [`TOKEN_ENV_VAR`] from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_token_override(std::env::var(TOKEN_ENV_VAR).ok())
    }

    /// Resolve the store URL and check required options
    pub fn validate(&self) -> Result<ResolvedConfig> {
        let store_url = match (
            self.store_url.trim().to_string().none_if_empty(),
            self.store_name.trim().to_string().none_if_empty(),
        ) {
            (Some(url), _) => url,
            (None, Some(name)) => format!("https://{name}.myshopify.com"),
            (None, None) => return Err(Error::config("Missing store name or url.")),
        };

        if self.storefront_token.is_empty() {
            return Err(Error::config("Missing storefront access token."));
        }
        if self.per_page == 0 {
            return Err(Error::invalid_value("perPage", "must be at least 1"));
        }
        if self.timeout == 0 {
            return Err(Error::invalid_value("timeout", "must be at least 1ms"));
        }

        let parsed = url::Url::parse(&store_url)
            .map_err(|e| Error::invalid_value("storeUrl", e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "storeUrl",
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        Ok(ResolvedConfig {
            store_url: store_url.trim_end_matches('/').to_string(),
            token: self.storefront_token.clone(),
            timeout: Duration::from_millis(self.timeout),
            per_page: self.per_page,
            type_name: self.type_name.clone(),
            types: self.types.clone(),
            api_version: self.api_version.clone(),
            page_backoff: Duration::from_millis(self.page_backoff),
        })
    }
}

// ============================================================================
// Resolved Config
// ============================================================================

/// Validated options with the store URL resolved
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Store root URL
    pub store_url: String,
    /// Storefront access token
    pub token: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Page size sent as `first`
    pub per_page: u32,
    /// Type name prefix
    pub type_name: String,
    /// Requested types (empty = all)
    pub types: Vec<String>,
    /// Storefront API version
    pub api_version: String,
    /// Delay before each follow-up page
    pub page_backoff: Duration,
}

impl ResolvedConfig {
    /// Endpoint for the connection factory
    pub fn endpoint(&self) -> StorefrontEndpoint {
        StorefrontEndpoint::new(&self.store_url, &self.token, self.timeout)
            .with_api_version(&self.api_version)
    }

    /// Engine settings
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new().with_page_backoff(self.page_backoff)
    }
}
