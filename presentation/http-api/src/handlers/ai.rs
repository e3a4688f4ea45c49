//! AI operation handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use tracing::debug;
use vibe_core::prelude::*;
use crate::{handle_core_error, require_text, ApiError, AppState, JsonObject, ToolsResponse};

const MISSING_PROMPT: &str = "Missing prompt in request body";
const MISSING_QUERY: &str = "Missing query in request body";

/// Generate a new idea, researching first when the LLM asks for it
pub async fn generate_idea(
    State(state): State<AppState>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<Json<Idea>, ApiError> {
    const FAILURE: &str = "Failed to generate idea";

    let prompt = body
        .map_err(|rejection| {
            debug!("Rejected idea request body: {}", rejection);
            CoreError::Validation(MISSING_PROMPT.to_string())
        })
        .and_then(|Json(request)| require_text(&request, "prompt", MISSING_PROMPT))
        .map_err(|e| handle_core_error(e, FAILURE))?;

    let idea = state
        .orchestrator
        .generate_idea_with_research(&prompt)
        .await
        .map_err(|e| handle_core_error(e, FAILURE))?;

    Ok(Json(idea))
}

/// Provide inspiration via web search and summarization
pub async fn inspire(
    State(state): State<AppState>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<Json<Inspiration>, ApiError> {
    const FAILURE: &str = "Failed to generate inspiration";

    let query = body
        .map_err(|rejection| {
            debug!("Rejected inspire request body: {}", rejection);
            CoreError::Validation(MISSING_QUERY.to_string())
        })
        .and_then(|Json(request)| require_text(&request, "query", MISSING_QUERY))
        .map_err(|e| handle_core_error(e, FAILURE))?;

    let inspiration = state
        .orchestrator
        .inspire_with_search(&query)
        .await
        .map_err(|e| handle_core_error(e, FAILURE))?;

    Ok(Json(inspiration))
}

/// List the tools available to the orchestrator
pub async fn list_tools(State(state): State<AppState>) -> Json<ToolsResponse> {
    let tools = state.orchestrator.tool_definitions();
    debug!("Listing {} tools", tools.len());
    Json(ToolsResponse { tools })
}
