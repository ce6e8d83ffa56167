//! Built-in Storefront queries
//!
//! One [`QuerySpec`] per catalog entity. Top-level connections are aliased as
//! `data`, so every spec except the collection follow-up reads from `data`.

mod documents;
mod spec;

pub use documents::{
    ARTICLES_QUERY, BLOGS_QUERY, COLLECTIONS_QUERY, COLLECTION_QUERY, PAGES_QUERY,
    PRODUCTS_QUERY, PRODUCT_TAGS_QUERY, PRODUCT_TYPES_QUERY,
};
pub use spec::{ContainerSpec, ItemKind, QuerySpec, DEFAULT_CONTAINER_KEY};

use crate::error::{Error, Result};

/// Path of the aliased top-level connection
pub const TOP_LEVEL_PATH: &str = "data";

/// Path of the products connection in [`COLLECTION_QUERY`] responses
pub const COLLECTION_PRODUCTS_PATH: &str = "collection.products";

/// Edge discriminator of collection edges
pub const COLLECTION_EDGE: &str = "CollectionEdge";

/// Names accepted by [`builtin`]
pub const BUILTIN_QUERIES: &[&str] = &[
    "productTypes",
    "productTags",
    "collections",
    "products",
    "blogs",
    "articles",
    "pages",
];

pub fn product_types() -> QuerySpec {
    QuerySpec::at_path("productTypes", PRODUCT_TYPES_QUERY, TOP_LEVEL_PATH)
}

pub fn product_tags() -> QuerySpec {
    QuerySpec::at_path("productTags", PRODUCT_TAGS_QUERY, TOP_LEVEL_PATH)
}

/// Collections, with each collection's `products` exhausted through
/// [`COLLECTION_QUERY`]
pub fn collections() -> QuerySpec {
    QuerySpec::at_path("collections", COLLECTIONS_QUERY, TOP_LEVEL_PATH).with_container(
        ContainerSpec::new(
            COLLECTION_EDGE,
            "products",
            COLLECTION_QUERY,
            crate::pagination::ConnectionPath::new(COLLECTION_PRODUCTS_PATH),
        ),
    )
}

pub fn products() -> QuerySpec {
    QuerySpec::at_path("products", PRODUCTS_QUERY, TOP_LEVEL_PATH)
}

pub fn blogs() -> QuerySpec {
    QuerySpec::at_path("blogs", BLOGS_QUERY, TOP_LEVEL_PATH)
}

pub fn articles() -> QuerySpec {
    QuerySpec::at_path("articles", ARTICLES_QUERY, TOP_LEVEL_PATH)
}

pub fn pages() -> QuerySpec {
    QuerySpec::at_path("pages", PAGES_QUERY, TOP_LEVEL_PATH)
}

/// Look up a built-in query by name
pub fn builtin(name: &str) -> Result<QuerySpec> {
    match name {
        "productTypes" => Ok(product_types()),
        "productTags" => Ok(product_tags()),
        "collections" => Ok(collections()),
        "products" => Ok(products()),
        "blogs" => Ok(blogs()),
        "articles" => Ok(articles()),
        "pages" => Ok(pages()),
        _ => Err(Error::UnknownQuery {
            name: name.to_string(),
        }),
    }
}
