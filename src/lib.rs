// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # storefront-sync
//!
//! Exhaustive fetching of cursor-paginated Storefront GraphQL connections,
//! and a catalog loader that turns the results into an in-memory node set.
//!
//! ## Features
//!
//! - **Connection Factory**: Versioned Storefront route, access token header, transport retries
//! - **Pagination Engine**: Follows `hasNextPage` / `after` until a connection is exhausted
//! - **Container Re-pagination**: Items embedding their own connection are completed in place
//! - **Catalog**: Products, variants, collections, blogs, articles and pages as linked nodes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront_sync::engine::{EngineConfig, PaginationEngine};
//! use storefront_sync::http::StorefrontEndpoint;
//! use storefront_sync::{queries, variables, Result};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let endpoint = StorefrontEndpoint::new(
//!         "https://my-store.myshopify.com",
//!         "storefront-token",
//!         Duration::from_secs(60),
//!     );
//!     let mut engine = PaginationEngine::connect(&endpoint, EngineConfig::default())?;
//!
//!     let collections = engine
//!         .fetch_all(&queries::collections(), variables([("first", 100)]))
//!         .await?;
//!     println!("{} collections", collections.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          CLI / Catalog                          │
//! │   sync → NodeStore     query → items     types     check        │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──┬───────────────┬───────────────┐
//! │    HTTP      │     GraphQL      │   Paginate    │    Queries    │
//! ├──────────────┼──────────────────┼───────────────┼───────────────┤
//! │ Base route   │ Request envelope │ Connection    │ Documents     │
//! │ Token header │ Error surfacing  │ Cursor        │ Accessors     │
//! │ Retry        │                  │ Engine fold   │ Containers    │
//! └──────────────┴──────────────────┴───────────────┴───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with retry, and the Storefront connection factory
pub mod http;

/// GraphQL request envelope and client
pub mod graphql;

/// Relay connections and cursor advancement
pub mod pagination;

/// Pagination engine
pub mod engine;

/// Built-in query documents and specs
pub mod queries;

/// Node types, node store and catalog loader
pub mod catalog;

/// Source configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use catalog::{CatalogLoader, NodeStore};
pub use config::{ResolvedConfig, SourceConfig};
pub use engine::{EngineConfig, PaginationEngine};
pub use queries::QuerySpec;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
