//! Tool provider for the Vibe AI orchestrator
//!
//! Exposes three tools: `http_get_json` (real HTTP GET), `web_search`
//! (canned results) and `db_query` (SQLite).

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info};
use vibe_core::prelude::*;

mod config;
mod search;
mod sqlite;

pub use config::McpToolsConfig;

/// Default tool provider backed by reqwest and SQLite
pub struct McpTools {
    client: Client,
    config: McpToolsConfig,
}

impl McpTools {
    /// Create a new tool provider
    pub fn new(config: McpToolsConfig) -> Result<Self, ToolError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| ToolError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ToolProvider for McpTools {
    fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: "http_get_json".to_string(),
                description: "Make HTTP GET requests and return JSON data".to_string(),
                parameters: vec![
                    ToolParameter::required("url", ParameterType::String, "URL to make the request to"),
                    ToolParameter::optional("headers", ParameterType::Object, "Optional headers"),
                ],
            },
            ToolDefinition {
                name: "web_search".to_string(),
                description: "Search the web for information".to_string(),
                parameters: vec![
                    ToolParameter::required("query", ParameterType::String, "Search query"),
                    ToolParameter::optional(
                        "num_results",
                        ParameterType::Integer,
                        format!("Number of results to return (default: {})", DEFAULT_SEARCH_RESULTS),
                    ),
                ],
            },
            ToolDefinition {
                name: "db_query".to_string(),
                description: "Execute database queries".to_string(),
                parameters: vec![
                    ToolParameter::required("query", ParameterType::String, "SQL query to execute"),
                    ToolParameter::optional("params", ParameterType::Array, "Query parameters"),
                ],
            },
        ]
    }

    async fn web_search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>, ToolError> {
        let results = search::mock_results(query, num_results)?;
        info!("Web search performed for query: {}", query);
        Ok(results)
    }

    async fn http_get_json(&self, url: &str, headers: &HashMap<String, String>) -> Result<Value, ToolError> {
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!("HTTP GET request failed: {}", e);
                ToolError::Http(e.to_string())
            })?;

        let body = response.bytes().await.map_err(|e| ToolError::Http(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| {
            error!("Failed to decode JSON response: {}", e);
            ToolError::InvalidJson(e.to_string())
        })
    }

    async fn db_query(&self, query: &str, params: &[Value]) -> Result<Vec<Map<String, Value>>, ToolError> {
        let path = self.config.db_path.clone();
        let sql = query.to_string();
        let params = params.to_vec();

        let rows = tokio::task::spawn_blocking(move || sqlite::run_query(&path, &sql, &params))
            .await
            .map_err(|e| ToolError::Database(format!("Query task failed: {}", e)))?
            .map_err(|e| {
                error!("{}", e);
                e
            })?;

        info!("Database query executed successfully: {}", query);
        Ok(rows)
    }
}
