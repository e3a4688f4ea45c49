//! # Vibe Core
//!
//! Core types, traits, and orchestration logic for the Vibe backend.
//! Connectors and adapters implement the traits defined here; the
//! presentation layer only ever talks to the [`AiOrchestrator`].

pub mod types;
pub mod traits;
pub mod errors;
pub mod orchestrator;

// Re-export commonly used types and traits
pub use types::{Idea, Inspiration, SearchResult, ToolDefinition};
pub use traits::{LlmConnector, ToolProvider, ToolInvocation};
pub use errors::{CoreError, LlmError, PresentationError, ToolError};
pub use orchestrator::{AiOrchestrator, OrchestratorConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::traits::*;
    pub use crate::errors::*;
    pub use crate::orchestrator::*;
    pub use async_trait::async_trait;
}
