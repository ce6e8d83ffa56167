//! Query specifications
//!
//! A [`QuerySpec`] pairs a GraphQL document with the accessor that finds its
//! connection, and optionally describes container edges whose nested
//! connection needs its own pagination.

use crate::pagination::{ConnectionAccessor, ConnectionPath, Edge};
use std::fmt;
use std::sync::Arc;

/// Default item field that identifies a container
pub const DEFAULT_CONTAINER_KEY: &str = "handle";

/// A paginated query and where to find its connection
#[derive(Clone)]
pub struct QuerySpec {
    /// Short name, e.g. `products`
    pub name: String,
    /// GraphQL document
    pub query: String,
    accessor: Arc<dyn ConnectionAccessor>,
    /// Container edges needing nested re-pagination
    pub container: Option<ContainerSpec>,
}

impl QuerySpec {
    /// Create a spec with a custom accessor
    pub fn new(
        name: impl Into<String>,
        query: impl Into<String>,
        accessor: impl ConnectionAccessor + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
            accessor: Arc::new(accessor),
            container: None,
        }
    }

    /// Create a spec whose connection sits at a dot-separated path
    pub fn at_path(name: impl Into<String>, query: impl Into<String>, path: &str) -> Self {
        Self::new(name, query, ConnectionPath::new(path))
    }

    /// Attach a container description
    #[must_use]
    pub fn with_container(mut self, container: ContainerSpec) -> Self {
        self.container = Some(container);
        self
    }

    /// Accessor for the top-level connection
    pub fn accessor(&self) -> &dyn ConnectionAccessor {
        self.accessor.as_ref()
    }

    /// Decide how an edge of this query's connection is handled
    pub fn classify(&self, edge: &Edge) -> ItemKind<'_> {
        match &self.container {
            Some(container) if container.matches(edge) => ItemKind::Container(container),
            _ => ItemKind::Simple,
        }
    }
}

impl fmt::Debug for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySpec")
            .field("name", &self.name)
            .field("connection", &self.accessor.describe())
            .field("container", &self.container)
            .finish_non_exhaustive()
    }
}

/// Edges of this type embed a paginated sub-connection
#[derive(Clone)]
pub struct ContainerSpec {
    /// Edge discriminator, e.g. `CollectionEdge`
    pub edge_type: String,
    /// Item field holding the nested connection, e.g. `products`
    pub field: String,
    /// Item field identifying the container, e.g. `handle`
    pub key_field: String,
    /// Variable receiving the key in the follow-up query
    pub key_variable: String,
    /// Document fetching the remaining sub-edges
    pub query: String,
    accessor: Arc<dyn ConnectionAccessor>,
}

impl ContainerSpec {
    pub fn new(
        edge_type: impl Into<String>,
        field: impl Into<String>,
        query: impl Into<String>,
        accessor: impl ConnectionAccessor + 'static,
    ) -> Self {
        Self {
            edge_type: edge_type.into(),
            field: field.into(),
            key_field: DEFAULT_CONTAINER_KEY.to_string(),
            key_variable: DEFAULT_CONTAINER_KEY.to_string(),
            query: query.into(),
            accessor: Arc::new(accessor),
        }
    }

    /// Use a different key field and variable
    #[must_use]
    pub fn with_key(mut self, key_field: impl Into<String>, key_variable: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self.key_variable = key_variable.into();
        self
    }

    /// Accessor for the nested connection in follow-up responses
    pub fn accessor(&self) -> &dyn ConnectionAccessor {
        self.accessor.as_ref()
    }

    /// Whether an edge carries this container's discriminator
    pub fn matches(&self, edge: &Edge) -> bool {
        edge.type_name.as_deref() == Some(self.edge_type.as_str())
    }
}

impl fmt::Debug for ContainerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerSpec")
            .field("edge_type", &self.edge_type)
            .field("field", &self.field)
            .field("key_field", &self.key_field)
            .field("key_variable", &self.key_variable)
            .field("connection", &self.accessor.describe())
            .finish_non_exhaustive()
    }
}

/// How an item is handled once the flat sequence is assembled
#[derive(Debug, Clone, Copy)]
pub enum ItemKind<'a> {
    /// Passed through unchanged
    Simple,
    /// Nested connection is exhausted and spliced back in
    Container(&'a ContainerSpec),
}
