//! GraphQL module
//!
//! Request/response envelope and the client that executes one GraphQL request
//! against the Storefront endpoint.

mod client;
mod types;

pub use client::GraphQlClient;
pub use types::{GraphQlError, GraphQlErrorLocation, GraphQlRequest, GraphQlResponse};
