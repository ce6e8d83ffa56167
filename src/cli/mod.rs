//! CLI module
//!
//! Command-line interface for syncing a store.
//!
//! # Commands
//!
//! - `sync` - Load every included type and write the node set
//! - `query` - Run one built-in query and print its items
//! - `types` - List type names
//! - `check` - Test connection to the store

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{merge_vars, parse_var, Runner};
