//! Error types for Vibe core operations

use thiserror::Error;

/// Main error type for Vibe core operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("LLM connector error: {0}")]
    Llm(#[from] LlmError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Presentation error: {0}")]
    Presentation(#[from] PresentationError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors related to LLM connector operations
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error from LLM provider: {0}")]
    ApiError(String),

    #[error("Timeout during LLM call")]
    Timeout,

    #[error("Failed to parse LLM response: {0}")]
    ResponseParseError(String),

    #[error("Internal connector error: {0}")]
    InternalError(String),
}

/// Errors raised while executing a tool
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("Database query failed: {0}")]
    Database(String),
}

/// Errors related to the HTTP presentation layer
#[derive(Error, Debug)]
pub enum PresentationError {
    #[error("Server startup failed: {0}")]
    StartupFailed(String),

    #[error("Server error: {0}")]
    ServeFailed(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type alias for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

/// Result type alias for tool operations
pub type ToolResult<T> = Result<T, ToolError>;
