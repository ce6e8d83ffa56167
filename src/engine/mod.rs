//! Pagination engine module
//!
//! Exhaustive retrieval of cursor-paginated GraphQL connections.
//!
//! # Overview
//!
//! The engine module provides:
//! - `PaginationEngine` - Fetches every page of a query, then expands container items
//! - `EngineConfig` - Page backoff and cursor variable
//! - `SyncStats` - Request, page and item counters
//!
//! Pages are fetched strictly one after another: every follow-up request
//! needs the cursor of the page before it.

mod types;

pub use types::{EngineConfig, SyncStats, DEFAULT_PAGE_BACKOFF};

use crate::error::{Error, Result};
use crate::graphql::GraphQlClient;
use crate::http::{self, StorefrontEndpoint};
use crate::pagination::{
    Connection, ConnectionAccessor, CursorPaginator, Edge, NextPage, PaginationState,
};
use crate::queries::{ContainerSpec, ItemKind, QuerySpec};
use crate::types::{JsonValue, Variables};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drives queries to exhaustion
pub struct PaginationEngine {
    /// GraphQL client
    client: GraphQlClient,
    /// Engine configuration
    config: EngineConfig,
    /// Cursor advancement
    paginator: CursorPaginator,
    /// Statistics
    stats: SyncStats,
}

impl PaginationEngine {
    /// Create a new engine with default configuration
    pub fn new(client: GraphQlClient) -> Self {
        Self::with_config(client, EngineConfig::default())
    }

    /// Create a new engine with custom configuration
    pub fn with_config(client: GraphQlClient, config: EngineConfig) -> Self {
        let paginator = CursorPaginator::new(config.cursor_variable.clone());
        Self {
            client,
            config,
            paginator,
            stats: SyncStats::default(),
        }
    }

    /// Connect to a store and build an engine on top of it
    pub fn connect(endpoint: &StorefrontEndpoint, config: EngineConfig) -> Result<Self> {
        let http = http::connect(endpoint)?;
        Ok(Self::with_config(GraphQlClient::new(http), config))
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = SyncStats::default();
    }

    /// Fetch every item of a query
    ///
    /// The top-level connection is exhausted first. Container items are then
    /// expanded one at a time, in sequence order. Any GraphQL error aborts the
    /// whole call and no items are returned.
    pub async fn fetch_all(
        &mut self,
        spec: &QuerySpec,
        variables: Variables,
    ) -> Result<Vec<JsonValue>> {
        let start = Instant::now();
        self.stats.mark_started();

        let result = self.fetch_all_inner(spec, &variables).await;

        self.stats.add_duration(start.elapsed().as_millis() as u64);
        let items = result?;
        info!(
            "Fetched {} item(s) for '{}' in {:?}",
            items.len(),
            spec.name,
            start.elapsed()
        );
        Ok(items)
    }

    async fn fetch_all_inner(
        &mut self,
        spec: &QuerySpec,
        variables: &Variables,
    ) -> Result<Vec<JsonValue>> {
        let edges = self
            .exhaust(&spec.query, spec.accessor(), variables.clone())
            .await?;

        let mut items = Vec::with_capacity(edges.len());
        for edge in edges {
            let item = match spec.classify(&edge) {
                ItemKind::Simple => edge.node,
                ItemKind::Container(container) => {
                    self.expand_container(container, edge.node, variables)
                        .await?
                }
            };
            items.push(item);
        }
        Ok(items)
    }

    /// Fetch every page of one connection and return all edges in order
    ///
    /// Each follow-up request re-sends `variables` with the cursor variable
    /// set to the last cursor of the previous page, after the configured
    /// backoff.
    pub async fn exhaust(
        &mut self,
        query: &str,
        accessor: &dyn ConnectionAccessor,
        variables: Variables,
    ) -> Result<Vec<Edge>> {
        let mut state = PaginationState::new();
        let mut edges = Vec::new();
        let mut variables = variables;

        loop {
            if state.pages > 0 && !self.config.page_backoff.is_zero() {
                tokio::time::sleep(self.config.page_backoff).await;
            }

            debug!(
                "Requesting page {} of '{}' (cursor: {:?})",
                state.pages + 1,
                accessor.describe(),
                state.cursor
            );

            self.stats.add_request();
            let data = match self.client.execute(query, &variables).await {
                Ok(data) => data,
                Err(e) => {
                    warn!(
                        "Page {} of '{}' failed (transport: {}): {}",
                        state.pages + 1,
                        accessor.describe(),
                        e.is_retryable(),
                        e
                    );
                    return Err(e);
                }
            };
            let connection = accessor.connection(&data)?;

            let next = self
                .paginator
                .process_page(&connection, &variables, &mut state);
            self.stats.add_page(connection.edges.len());
            edges.extend(connection.edges);

            match next {
                NextPage::Continue { variables: next } => variables = next,
                NextPage::Done => break,
            }
        }

        debug!(
            "Exhausted '{}' after {} page(s), {} edge(s)",
            accessor.describe(),
            state.pages,
            state.total_fetched
        );
        Ok(edges)
    }

    /// Exhaust a container item's nested connection and splice it back in
    async fn expand_container(
        &mut self,
        container: &ContainerSpec,
        mut node: JsonValue,
        variables: &Variables,
    ) -> Result<JsonValue> {
        let held = match node.get(&container.field) {
            Some(nested) if !nested.is_null() => Connection::deserialize(nested)
                .map_err(|e| Error::connection_shape(container.field.clone(), e.to_string()))?,
            _ => {
                return Err(Error::connection_shape(
                    container.field.clone(),
                    "container item has no nested connection",
                ))
            }
        };

        if !held.has_next_page() {
            return Ok(node);
        }

        let Some(cursor) = held.last_cursor().map(str::to_string) else {
            warn!(
                "Nested '{}' reports hasNextPage with no edges, keeping item as-is",
                container.field
            );
            return Ok(node);
        };

        let key = node
            .get(&container.key_field)
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or_else(|| {
                Error::connection_shape(
                    container.key_field.clone(),
                    "container item has no identifying key",
                )
            })?;

        info!(
            "Fetching remaining '{}' for {} {}",
            container.field, container.key_field, key
        );

        let mut seed = variables.clone();
        seed.insert(container.key_variable.clone(), key);
        let seed = self.paginator.variables_after(&seed, &cursor);

        let remaining = self
            .exhaust(&container.query, container.accessor(), seed)
            .await?;

        let edges = held
            .edges
            .into_iter()
            .chain(remaining)
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let object = node.as_object_mut().ok_or_else(|| {
            Error::connection_shape(container.field.clone(), "container item is not an object")
        })?;
        object.insert(
            container.field.clone(),
            serde_json::json!({ "edges": edges }),
        );

        self.stats.add_container();
        Ok(node)
    }
}

impl std::fmt::Debug for PaginationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationEngine")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish()
    }
}
