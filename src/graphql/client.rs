//! GraphQL client
//!
//! Sends `{query, variables}` to the GraphQL endpoint and turns the response
//! envelope into either the `data` payload or a GraphQL error.

use super::types::{GraphQlRequest, GraphQlResponse};
use crate::error::{Error, Result};
use crate::http::{HttpClient, GRAPHQL_PATH};
use crate::types::{JsonValue, Variables};
use tracing::debug;

/// Executes GraphQL documents over an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: HttpClient,
    path: String,
}

impl GraphQlClient {
    /// Create a client posting to the default `graphql.json` path
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            path: GRAPHQL_PATH.to_string(),
        }
    }

    /// Override the endpoint path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Execute one request and return the `data` payload
    ///
    /// A non-empty `errors` list fails the call with the first message, even
    /// when `data` is also present. GraphQL errors are never retried here.
    pub async fn execute(&self, query: &str, variables: &Variables) -> Result<JsonValue> {
        let request = GraphQlRequest { query, variables };
        let response: GraphQlResponse = self.http.post_json(&self.path, &request).await?;

        if let Some(error) = response.first_error() {
            debug!(
                "GraphQL request failed with {} error(s)",
                response.errors.as_ref().map_or(0, Vec::len)
            );
            return Err(Error::graphql(error.message.clone()));
        }

        response
            .data
            .ok_or_else(|| Error::decode("GraphQL response has neither data nor errors"))
    }
}
