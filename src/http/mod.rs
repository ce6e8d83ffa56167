//! HTTP client module
//!
//! Provides the HTTP client with retry and backoff, and the factory that binds
//! it to a store's Storefront API.
//!
//! # Features
//!
//! - **Automatic Retries**: Send, status, body-read and decode failures share one budget
//! - **Backoff**: Exponential, capped at eight times the initial delay
//! - **Storefront binding**: Versioned base route and access token header

mod client;
mod factory;

pub use client::{HttpClient, RetryPolicy};
pub use factory::{
    connect, StorefrontEndpoint, ACCESS_TOKEN_HEADER, API_VERSION, GRAPHQL_PATH,
    TRANSPORT_RETRIES,
};

#[cfg(test)]
mod tests;
