//! Health check command implementation

use colored::*;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use vibe_core::errors::CoreError;

/// Health response from the server
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: Option<String>,
    pub timestamp: String,
    pub llm_provider: Option<String>,
}

/// Handle health check command
pub async fn handle_health_command(endpoint: &str) -> Result<(), CoreError> {
    info!("Checking Vibe health at {}", endpoint);

    match check_health(endpoint).await {
        Ok(health) => {
            println!("{}", "✓ Vibe is healthy".green().bold());
            println!("Status: {}", health.status.green());
            if let Some(version) = health.version {
                println!("Version: {}", version);
            }
            if let Some(provider) = health.llm_provider {
                println!("LLM provider: {}", provider);
            }
            println!("Timestamp: {}", health.timestamp);
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗ Vibe health check failed".red().bold());
            println!("Error: {}", e.to_string().red());
            Err(e)
        }
    }
}

/// Perform health check
async fn check_health(endpoint: &str) -> Result<HealthResponse, CoreError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| CoreError::Internal(format!("Failed to create HTTP client: {}", e)))?;

    let url = format!("{}/health", endpoint.trim_end_matches('/'));
    debug!("GET {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| CoreError::Internal(format!("HTTP GET failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CoreError::Internal(format!("Server returned {}", status)));
    }

    let health: HealthResponse = response
        .json()
        .await
        .map_err(|e| CoreError::Internal(format!("Invalid health response: {}", e)))?;

    if health.status != "healthy" {
        return Err(CoreError::Internal(format!("Server reports status '{}'", health.status)));
    }

    Ok(health)
}
