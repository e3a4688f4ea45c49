//! Configuration for OpenAI connector

use serde::{Deserialize, Serialize};

/// OpenAI API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// OpenAI API key
    pub api_key: String,
    /// Model to use (e.g., "gpt-4o", "gpt-3.5-turbo")
    pub model: String,
    /// API base URL
    pub api_base: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl OpenAiConfig {
    /// Create a new OpenAI config with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gpt-3.5-turbo".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            timeout_ms: 30_000,
        }
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL (for Azure OpenAI or other compatible services)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Chat completions endpoint for the configured base URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self::new("") // Empty API key - must be set by user
    }
}
