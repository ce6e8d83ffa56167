//! Engine types
//!
//! Configuration and statistics for the pagination engine.

use crate::pagination::DEFAULT_CURSOR_VARIABLE;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Default delay before each follow-up page request
pub const DEFAULT_PAGE_BACKOFF: Duration = Duration::from_millis(1000);

/// Configuration for the pagination engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Delay applied before every follow-up page request
    pub page_backoff: Duration,
    /// Variable receiving the cursor of the previous page
    pub cursor_variable: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_backoff: DEFAULT_PAGE_BACKOFF,
            cursor_variable: DEFAULT_CURSOR_VARIABLE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new engine config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay between pages
    #[must_use]
    pub fn with_page_backoff(mut self, backoff: Duration) -> Self {
        self.page_backoff = backoff;
        self
    }

    /// Set the cursor variable name
    #[must_use]
    pub fn with_cursor_variable(mut self, name: impl Into<String>) -> Self {
        self.cursor_variable = name.into();
        self
    }
}

/// Statistics gathered across fetches
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Requests issued, including failed ones
    pub requests: usize,
    /// Pages successfully folded
    pub pages_fetched: usize,
    /// Edges fetched across all pages
    pub items_fetched: usize,
    /// Container items whose nested connection was exhausted
    pub containers_expanded: usize,
    /// Time spent in fetches, in milliseconds
    pub duration_ms: u64,
    /// When the first fetch started
    pub started_at: Option<DateTime<Utc>>,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an issued request
    pub fn add_request(&mut self) {
        self.requests += 1;
    }

    /// Count a folded page and its edges
    pub fn add_page(&mut self, items: usize) {
        self.pages_fetched += 1;
        self.items_fetched += items;
    }

    /// Count an expanded container
    pub fn add_container(&mut self) {
        self.containers_expanded += 1;
    }

    /// Add elapsed time
    pub fn add_duration(&mut self, ms: u64) {
        self.duration_ms += ms;
    }

    /// Record the start of a fetch, keeping the earliest
    pub fn mark_started(&mut self) {
        self.started_at.get_or_insert_with(Utc::now);
    }
}
