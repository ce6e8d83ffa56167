//! Pagination module
//!
//! Supports: Relay-style cursor connections (`edges` + `pageInfo`)
//!
//! # Overview
//!
//! A [`ConnectionAccessor`] pulls the connection out of a decoded response,
//! and the [`CursorPaginator`] decides from that connection whether another
//! page must be fetched and with which variables.

mod cursor;
mod types;

pub use cursor::{CursorPaginator, DEFAULT_CURSOR_VARIABLE};
pub use types::{
    Connection, ConnectionAccessor, ConnectionPath, Edge, NextPage, PageInfo, PaginationState,
};
