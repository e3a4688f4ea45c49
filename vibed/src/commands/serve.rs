//! `serve` command: wire the connector, tools and orchestrator into the HTTP API

use crate::config::VibeConfig;
use std::sync::Arc;
use tracing::{error, info};
use vibe_adapter_mcp_tools::McpTools;
use vibe_connector_openai::OpenAiConnector;
use vibe_core::prelude::*;
use vibe_http_api::HttpApi;

/// Build the orchestrator from configuration
pub fn build_orchestrator(config: &VibeConfig) -> Result<AiOrchestrator, CoreError> {
    let llm = OpenAiConnector::new(config.openai.clone())?;
    let tools = McpTools::new(config.tools.clone())?;

    Ok(AiOrchestrator::new(
        Arc::new(llm),
        Arc::new(tools),
        config.orchestrator.clone(),
    ))
}

/// Handle serve command
pub async fn handle_serve_command(config: VibeConfig) -> Result<(), CoreError> {
    config.validate()?;

    let orchestrator = build_orchestrator(&config)?;
    info!(
        "Using {} model {} with fallback_on_error={}",
        orchestrator.provider_name(),
        config.openai.model,
        config.orchestrator.fallback_on_error
    );

    let api = HttpApi::new(config.server.clone(), Arc::new(orchestrator));
    api.serve_with_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
