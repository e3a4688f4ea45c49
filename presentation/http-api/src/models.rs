//! Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vibe_core::prelude::*;

/// A JSON object request body; arrays and scalars are rejected by the extractor
pub type JsonObject = Map<String, Value>;

/// Body of `GET /api/tools`
#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolDefinition>,
}

/// Error body returned by every failing route
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Return the value of a required text field in a request body.
///
/// Absent, non-string and blank values are all reported as a validation
/// error carrying `missing_message`. The value is returned untrimmed.
pub fn require_text(body: &JsonObject, key: &str, missing_message: &str) -> CoreResult<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| CoreError::Validation(missing_message.to_string()))
}
