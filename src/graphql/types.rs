//! GraphQL wire types
//!
//! Request body and response envelope for a GraphQL-over-HTTP endpoint.

use crate::types::{JsonValue, Variables};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of one GraphQL request
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Variables,
}

/// Decoded body of one GraphQL response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<JsonValue>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl GraphQlResponse {
    /// First reported error, if the `errors` list is present and non-empty
    pub fn first_error(&self) -> Option<&GraphQlError> {
        self.errors.as_ref().and_then(|errors| errors.first())
    }
}

/// One entry of the `errors` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    /// Human-readable error message
    pub message: String,
    /// Location(s) within the query
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locations: Vec<GraphQlErrorLocation>,
    /// Path within the response where the error occurred
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path: Vec<JsonValue>,
    /// Extensions metadata (e.g. `code`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<JsonValue>,
}

/// GraphQL error location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// Reads an explicit `null` list as empty
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
