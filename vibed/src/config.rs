//! Configuration management for vibed

use crate::cli::ServeArgs;
use figment::{Figment, providers::{Env, Format, Serialized, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vibe_adapter_mcp_tools::McpToolsConfig;
use vibe_connector_openai::OpenAiConfig;
use vibe_core::errors::CoreError;
use vibe_core::OrchestratorConfig;
use vibe_http_api::HttpApiConfig;

/// Configuration for the Vibe server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VibeConfig {
    pub server: HttpApiConfig,
    pub openai: OpenAiConfig,
    pub tools: McpToolsConfig,
    pub orchestrator: OrchestratorConfig,
}

impl VibeConfig {
    /// Load configuration from defaults, config files and the environment
    pub fn load(config_path: &Option<PathBuf>) -> Result<Self, CoreError> {
        let mut figment = Figment::from(Serialized::defaults(VibeConfig::default()));

        // Load from default config file if it exists
        let default_config_paths = [
            "vibe.yaml",
            "vibe.yml",
            ".vibe.yaml",
            ".vibe.yml",
        ];

        for path in &default_config_paths {
            if Path::new(path).exists() {
                figment = figment.merge(Yaml::file(path));
                break;
            }
        }

        // Load from specified config file
        if let Some(path) = config_path {
            if path.exists() {
                figment = figment.merge(Yaml::file(path));
            } else {
                return Err(CoreError::Configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
        }

        // Environment variables, e.g. VIBE_OPENAI__MODEL=gpt-4o
        figment = figment.merge(Env::prefixed("VIBE_").split("__"));

        let mut config: VibeConfig = figment.extract()
            .map_err(|e| CoreError::Configuration(format!("Failed to parse configuration: {}", e)))?;

        if config.openai.api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                config.openai.api_key = key;
            }
        }

        Ok(config)
    }

    /// Apply `serve` argument overrides to the configuration
    pub fn with_overrides(mut self, args: &ServeArgs) -> Self {
        if let Some(bind) = args.bind {
            self.server.bind_address = bind;
        }

        if let Some(ref model) = args.model {
            self.openai.model = model.clone();
        }

        self
    }

    /// Base URL a local client should use to reach the configured server
    pub fn local_endpoint(&self) -> String {
        let addr = self.server.bind_address;
        if addr.ip().is_unspecified() {
            format!("http://127.0.0.1:{}", addr.port())
        } else {
            format!("http://{}", addr)
        }
    }

    /// Check settings that have no usable default
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.openai.api_key.trim().is_empty() {
            return Err(CoreError::Configuration(
                "No OpenAI API key configured. Set openai.api_key, VIBE_OPENAI__API_KEY or OPENAI_API_KEY".to_string()
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(CoreError::Configuration(
                "server.request_timeout_secs must be greater than zero".to_string()
            ));
        }
        Ok(())
    }
}
