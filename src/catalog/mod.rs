//! Catalog module
//!
//! Consumes engine output and builds the in-memory node set.
//!
//! # Overview
//!
//! - `TypeNames` - Prefixed node type names and derived IDs
//! - `NodeStore` - Ordered node collections and references
//! - `CatalogLoader` - Loads every included type through the engine
//!
//! Nested objects (images, prices, variants) become nodes of their own and
//! are replaced by `{"typeName", "id"}` references.

mod loader;
mod store;
mod typenames;

pub use loader::CatalogLoader;
pub use store::{NodeCollection, NodeStore};
pub use typenames::{derived_id, pascal_case, TypeNames, IMAGE_TYPE, PRICE_TYPE};

#[cfg(test)]
mod tests;
