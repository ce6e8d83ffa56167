//! Pagination types and traits
//!
//! Defines the GraphQL connection shape and the core pagination abstractions.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Variables};
use serde::{Deserialize, Serialize};

/// One edge of a connection: a node plus its opaque cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// The result item
    pub node: JsonValue,
    /// Opaque position token, only meaningful to the server
    pub cursor: String,
    /// Edge-level type discriminator (`typeName: __typename` in the query)
    #[serde(rename = "typeName", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Any other fields selected on the edge
    #[serde(flatten)]
    pub extra: JsonObject,
}

#[cfg(test)]
impl Edge {
    /// Create an edge with no discriminator
    pub fn new(node: JsonValue, cursor: impl Into<String>) -> Self {
        Self {
            node,
            cursor: cursor.into(),
            type_name: None,
            extra: JsonObject::new(),
        }
    }

    /// Set the type discriminator
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

/// Page info of a connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

/// A GraphQL connection: ordered edges plus page info
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub edges: Vec<Edge>,
    pub page_info: PageInfo,
}

impl Connection {
    /// Whether the server reports more pages
    pub fn has_next_page(&self) -> bool {
        self.page_info.has_next_page
    }

    /// Cursor of the last edge, the only valid `after` for the next page
    pub fn last_cursor(&self) -> Option<&str> {
        self.edges.last().map(|edge| edge.cursor.as_str())
    }
}

/// Locates the connection of interest inside a decoded `data` payload
pub trait ConnectionAccessor: Send + Sync {
    /// Extract the connection from the `data` payload
    fn connection(&self, data: &JsonValue) -> Result<Connection>;

    /// Human-readable location, used in logs and errors
    fn describe(&self) -> String {
        "<custom accessor>".to_string()
    }
}

impl<F> ConnectionAccessor for F
where
    F: Fn(&JsonValue) -> Result<Connection> + Send + Sync,
{
    fn connection(&self, data: &JsonValue) -> Result<Connection> {
        self(data)
    }
}

/// Dot-separated path to a connection, e.g. `collection.products`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionPath {
    segments: Vec<String>,
}

impl ConnectionPath {
    /// Parse a dot-separated path; a leading `$.` is ignored
    pub fn new(path: &str) -> Self {
        let path = path.strip_prefix("$.").unwrap_or(path);
        Self {
            segments: path
                .split('.')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Walk the path and return the value it points at
    pub fn resolve<'a>(&self, value: &'a JsonValue) -> Option<&'a JsonValue> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| current.get(segment.as_str()))
    }
}

impl std::fmt::Display for ConnectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl ConnectionAccessor for ConnectionPath {
    fn connection(&self, data: &JsonValue) -> Result<Connection> {
        let value = self
            .resolve(data)
            .filter(|v| !v.is_null())
            .ok_or_else(|| Error::connection_shape(self.to_string(), "no value at path"))?;

        Connection::deserialize(value)
            .map_err(|e| Error::connection_shape(self.to_string(), e.to_string()))
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq)]
pub enum NextPage {
    /// More pages available; request again with these variables
    Continue {
        /// Variables for the follow-up request
        variables: Variables,
    },
    /// No more pages
    Done,
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages processed so far
    pub pages: u32,
    /// Total edges fetched so far
    pub total_fetched: u64,
    /// Cursor sent with the next request
    pub cursor: Option<String>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Count a processed page
    pub fn add_page(&mut self) {
        self.pages += 1;
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}
