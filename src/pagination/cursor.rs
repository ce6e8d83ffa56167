//! Relay-style cursor pagination
//!
//! Advances by re-sending the previous variables with the cursor variable set
//! to the last edge's cursor, until `pageInfo.hasNextPage` is false.

use super::types::{Connection, NextPage, PaginationState};
use crate::types::{JsonValue, Variables};
use tracing::warn;

/// Default name of the cursor variable
pub const DEFAULT_CURSOR_VARIABLE: &str = "after";

/// Cursor-based pagination over GraphQL connections
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Variable name receiving the cursor
    pub cursor_variable: String,
}

impl Default for CursorPaginator {
    fn default() -> Self {
        Self::new(DEFAULT_CURSOR_VARIABLE)
    }
}

impl CursorPaginator {
    /// Create a new cursor paginator
    pub fn new(cursor_variable: impl Into<String>) -> Self {
        Self {
            cursor_variable: cursor_variable.into(),
        }
    }

    /// Variables for a request starting after `cursor`
    pub fn variables_after(&self, variables: &Variables, cursor: &str) -> Variables {
        let mut next = variables.clone();
        next.insert(
            self.cursor_variable.clone(),
            JsonValue::String(cursor.to_string()),
        );
        next
    }

    /// Process one page and determine if there's a next page
    pub fn process_page(
        &self,
        connection: &Connection,
        variables: &Variables,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_page();
        state.add_fetched(connection.edges.len() as u64);

        if !connection.has_next_page() {
            state.mark_done();
            return NextPage::Done;
        }

        match connection.last_cursor() {
            Some(cursor) => {
                state.set_cursor(cursor.to_string());
                NextPage::Continue {
                    variables: self.variables_after(variables, cursor),
                }
            }
            None => {
                warn!(
                    "Page {} reported hasNextPage with no edges, stopping",
                    state.pages
                );
                state.mark_done();
                NextPage::Done
            }
        }
    }
}
