//! OpenAI connector for Vibe LLM operations

use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, error, info};
use vibe_core::prelude::*;

mod config;
mod models;

pub use config::OpenAiConfig;
use models::*;

/// Provider name reported in completion metadata
const PROVIDER: &str = "openai";

/// OpenAI implementation of LlmConnector
pub struct OpenAiConnector {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiConnector {
    /// Create a new OpenAI connector
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| LlmError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Model this connector sends requests to
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_request(&self, request: CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature.map(|t| t.clamp(0.0, 2.0)),
        }
    }

    /// Turn a non-success response body into a readable message
    fn api_error_message(body: &str) -> String {
        serde_json::from_str::<OpenAiError>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string())
    }

    /// Calculate estimated cost based on token usage
    fn calculate_cost(&self, usage: &Usage) -> Option<f64> {
        // OpenAI pricing (approximate)
        let (input_cost_per_1k, output_cost_per_1k) = match self.config.model.as_str() {
            "gpt-4" => (0.03, 0.06),
            "gpt-4-turbo" => (0.01, 0.03),
            "gpt-4o" => (0.005, 0.015),
            "gpt-3.5-turbo" => (0.0005, 0.0015),
            _ => return None,
        };

        let input_cost = (usage.prompt_tokens as f64 / 1000.0) * input_cost_per_1k;
        let output_cost = (usage.completion_tokens as f64 / 1000.0) * output_cost_per_1k;

        Some(input_cost + output_cost)
    }
}

#[async_trait]
impl LlmConnector for OpenAiConnector {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!("Starting OpenAI completion with model {}", self.config.model);
        let start_time = Instant::now();

        let chat_request = self.build_request(request);

        let response = self.client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::NetworkError(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("OpenAI API returned {}", status);
            return Err(LlmError::ApiError(format!(
                "OpenAI API error {}: {}",
                status,
                Self::api_error_message(&error_text)
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await
            .map_err(|e| LlmError::ResponseParseError(format!("Failed to parse response: {}", e)))?;

        let text = chat_response.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::ResponseParseError("No content in response".to_string()))?;

        let latency = start_time.elapsed();
        let usage = chat_response.usage.as_ref();
        let metadata = Some(CompletionMetadata {
            provider: PROVIDER.to_string(),
            model_name: self.config.model.clone(),
            latency_ms: Some(latency.as_millis() as u64),
            input_tokens: usage.map(|u| u.prompt_tokens),
            output_tokens: usage.map(|u| u.completion_tokens),
            cost_usd: usage.and_then(|u| self.calculate_cost(u)),
        });

        info!("OpenAI completion finished in {}ms", latency.as_millis());

        Ok(CompletionResponse { text, metadata })
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
