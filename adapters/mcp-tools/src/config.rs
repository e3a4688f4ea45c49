//! Configuration types for the MCP tools adapter

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the tool provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct McpToolsConfig {
    /// SQLite database used by `db_query`
    pub db_path: PathBuf,
    /// Timeout for `http_get_json` requests in seconds
    pub http_timeout_secs: u64,
}

impl Default for McpToolsConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("database/app.db"),
            http_timeout_secs: 10,
        }
    }
}

impl McpToolsConfig {
    /// Create a new config using the given database file
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Default::default()
        }
    }

    /// Set the HTTP timeout
    pub fn with_http_timeout(mut self, secs: u64) -> Self {
        self.http_timeout_secs = secs;
        self
    }
}
