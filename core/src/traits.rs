//! Core traits defining the connector and tool interfaces for Vibe

use crate::errors::{LlmError, ToolError};
use crate::types::{SearchResult, ToolDefinition};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Trait for Large Language Model connectors
#[async_trait]
pub trait LlmConnector: Send + Sync {
    /// Generate a text completion for a single user prompt
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Short provider name used in logs and health output
    fn provider_name(&self) -> &str;
}

/// Request for text completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Input prompt
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature for generation
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Response from text completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text
    pub text: String,
    /// Metadata about the completion
    pub metadata: Option<CompletionMetadata>,
}

/// Metadata about an LLM call
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompletionMetadata {
    /// LLM provider used
    pub provider: String,
    /// Model name used
    pub model_name: String,
    /// Latency in milliseconds
    pub latency_ms: Option<u64>,
    /// Input tokens consumed
    pub input_tokens: Option<u32>,
    /// Output tokens generated
    pub output_tokens: Option<u32>,
    /// Estimated cost in USD
    pub cost_usd: Option<f64>,
}

/// Tools the orchestrator can call on
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Definitions of every tool this provider can execute
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Search the web for `query`, returning at most `num_results` hits
    async fn web_search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>, ToolError>;

    /// GET `url` and decode the body as JSON
    async fn http_get_json(&self, url: &str, headers: &HashMap<String, String>) -> Result<Value, ToolError>;

    /// Run a SQL query, returning one JSON object per row
    async fn db_query(&self, query: &str, params: &[Value]) -> Result<Vec<Map<String, Value>>, ToolError>;

    /// Execute a tool invocation and return its result as JSON
    async fn execute(&self, invocation: ToolInvocation) -> Result<Value, ToolError> {
        match invocation {
            ToolInvocation::HttpGetJson { url, headers } => self.http_get_json(&url, &headers).await,
            ToolInvocation::WebSearch { query, num_results } => {
                let results = self.web_search(&query, num_results).await?;
                serde_json::to_value(results).map_err(|e| ToolError::InvalidJson(e.to_string()))
            }
            ToolInvocation::DbQuery { query, params } => {
                let rows = self.db_query(&query, &params).await?;
                Ok(Value::Array(rows.into_iter().map(Value::Object).collect()))
            }
        }
    }
}

/// Names of the tools understood by [`ToolInvocation`]
pub const TOOL_NAMES: [&str; 3] = ["http_get_json", "web_search", "db_query"];

/// Default number of results for `web_search`
pub const DEFAULT_SEARCH_RESULTS: usize = 5;

fn default_num_results() -> usize {
    DEFAULT_SEARCH_RESULTS
}

/// A parsed call to one of the known tools
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolInvocation {
    HttpGetJson {
        url: String,
        #[serde(default)]
        headers: HashMap<String, String>,
    },
    WebSearch {
        query: String,
        #[serde(default = "default_num_results")]
        num_results: usize,
    },
    DbQuery {
        query: String,
        #[serde(default)]
        params: Vec<Value>,
    },
}

impl ToolInvocation {
    /// Build an invocation from a tool name and a JSON object of arguments
    pub fn from_name(name: &str, arguments: Value) -> Result<Self, ToolError> {
        if !TOOL_NAMES.contains(&name) {
            return Err(ToolError::UnknownTool(name.to_string()));
        }

        serde_json::from_value(json!({ "name": name, "arguments": arguments }))
            .map_err(|e| ToolError::InvalidArguments {
                tool: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Name of the invoked tool
    pub fn name(&self) -> &'static str {
        match self {
            ToolInvocation::HttpGetJson { .. } => "http_get_json",
            ToolInvocation::WebSearch { .. } => "web_search",
            ToolInvocation::DbQuery { .. } => "db_query",
        }
    }
}
