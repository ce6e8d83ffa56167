//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROUTE: &str = "/api/2023-01/graphql.json";

fn endpoint_for(server: &MockServer) -> StorefrontEndpoint {
    StorefrontEndpoint::new(server.uri(), "storefront-token", Duration::from_secs(5))
        .with_retry_backoff(Duration::from_millis(10))
}

async fn post(server: &MockServer) -> crate::Result<Value> {
    connect(&endpoint_for(server))
        .unwrap()
        .post_json(GRAPHQL_PATH, &json!({"query": "{ shop { name } }"}))
        .await
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

// ============================================================================
// Connection Factory Tests
// ============================================================================

#[test]
fn test_endpoint_base_url() {
    let endpoint = StorefrontEndpoint::new(
        "https://my-store.myshopify.com",
        "token",
        Duration::from_secs(60),
    );
    assert_eq!(
        endpoint.base_url().unwrap(),
        "https://my-store.myshopify.com/api/2023-01"
    );

    let endpoint = StorefrontEndpoint::new("https://shop.example.com/", "token", Duration::ZERO)
        .with_api_version("2024-04");
    assert_eq!(
        endpoint.base_url().unwrap(),
        "https://shop.example.com/api/2024-04"
    );
}

#[test]
fn test_endpoint_rejects_bad_urls() {
    let endpoint = StorefrontEndpoint::new("not a url", "token", Duration::ZERO);
    assert!(matches!(endpoint.base_url(), Err(Error::InvalidUrl(_))));

    let endpoint = StorefrontEndpoint::new("ftp://shop.example.com", "token", Duration::ZERO);
    assert!(matches!(
        endpoint.base_url(),
        Err(Error::InvalidConfigValue { .. })
    ));
}

#[test]
fn test_connect_requires_token() {
    let endpoint = StorefrontEndpoint::new("https://my-store.myshopify.com", "", Duration::ZERO);
    let err = connect(&endpoint).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

#[test]
fn test_connect_rejects_token_that_is_not_a_header_value() {
    let endpoint =
        StorefrontEndpoint::new("https://my-store.myshopify.com", "abc\ndef", Duration::ZERO);
    let err = connect(&endpoint).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "storefrontToken"));
}

#[test]
fn test_client_debug_hides_token() {
    let endpoint = StorefrontEndpoint::new(
        "https://my-store.myshopify.com",
        "super-secret",
        Duration::from_secs(5),
    );
    let debug_str = format!("{:?}", connect(&endpoint).unwrap());
    assert!(debug_str.contains("https://my-store.myshopify.com/api/2023-01"));
    assert!(!debug_str.contains("super-secret"));
}

#[tokio::test]
async fn test_connect_sends_token_to_versioned_route() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTE))
        .and(header(ACCESS_TOKEN_HEADER, "storefront-token"))
        .and(body_json(json!({"query": "{ shop { name } }"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"shop": {"name": "Test Store"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = post(&server).await.unwrap();
    assert_eq!(body["data"]["shop"]["name"], "Test Store");
}

// ============================================================================
// Transport Retry Tests
// ============================================================================

#[tokio::test]
async fn test_server_error_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTE))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ROUTE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    let body = post(&server).await.unwrap();
    assert_eq!(body, json!({"data": {}}));
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_origin_failure_status_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTE))
        .respond_with(ResponseTemplate::new(522))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ROUTE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    post(&server).await.unwrap();
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_budget_exhausted_returns_last_failure() {
    let server = MockServer::start().await;

    // Initial attempt plus the transport budget
    Mock::given(method("POST"))
        .and(path(ROUTE))
        .respond_with(ResponseTemplate::new(503).set_body_string("Unavailable"))
        .expect(u64::from(TRANSPORT_RETRIES) + 1)
        .mount(&server)
        .await;

    let err = post(&server).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, ref body } if body == "Unavailable"));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTE))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let err = post(&server).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 401, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTE))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ROUTE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"data": {"edges": [], "pageInfo": {"hasNextPage": false}}}
        })))
        .mount(&server)
        .await;

    let body = post(&server).await.unwrap();
    assert_eq!(body["data"]["data"]["pageInfo"]["hasNextPage"], false);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_malformed_body_exhausts_budget() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTE))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(u64::from(TRANSPORT_RETRIES) + 1)
        .mount(&server)
        .await;

    let err = post(&server).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_timeout_is_retried_then_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTE))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let endpoint = StorefrontEndpoint::new(server.uri(), "t", Duration::from_millis(50))
        .with_retry_backoff(Duration::from_millis(10));
    let err = connect(&endpoint)
        .unwrap()
        .post_json::<_, Value>(GRAPHQL_PATH, &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
    assert_eq!(request_count(&server).await, 3);
}

#[test]
fn test_retry_backoff_doubles_up_to_cap() {
    let policy = RetryPolicy::new(TRANSPORT_RETRIES, Duration::from_millis(100));

    assert_eq!(policy.backoff(0), Duration::from_millis(100));
    assert_eq!(policy.backoff(1), Duration::from_millis(200));
    assert_eq!(policy.backoff(2), Duration::from_millis(400));
    assert_eq!(policy.backoff(3), Duration::from_millis(800));
    assert_eq!(policy.backoff(10), Duration::from_millis(800));
}
