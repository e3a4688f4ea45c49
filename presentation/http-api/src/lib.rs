//! HTTP presentation layer for Vibe
//!
//! Serves the AI routes under `/api` plus a health check. Every handler is a
//! direct mapping from a JSON request to one [`AiOrchestrator`] call.

use axum::{
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use vibe_core::prelude::*;

mod handlers;
mod middleware;
mod models;

pub use models::*;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpApiConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
    /// Enable permissive CORS
    pub enable_cors: bool,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 5000)),
            enable_cors: true,
            request_timeout_secs: 60,
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AiOrchestrator>,
}

/// HTTP server wrapping the orchestrator
pub struct HttpApi {
    config: HttpApiConfig,
    orchestrator: Arc<AiOrchestrator>,
}

impl HttpApi {
    /// Create a new server
    pub fn new(config: HttpApiConfig, orchestrator: Arc<AiOrchestrator>) -> Self {
        Self { config, orchestrator }
    }

    /// Build the Axum router with all routes
    pub fn router(&self) -> Router {
        let state = AppState {
            orchestrator: self.orchestrator.clone(),
        };

        let api = Router::new()
            .route("/generate-idea", post(handlers::ai::generate_idea))
            .route("/inspire", post(handlers::ai::inspire))
            .route("/tools", get(handlers::ai::list_tools))
            .route("/health", get(handlers::health::health_check));

        let timeout = Duration::from_secs(self.config.request_timeout_secs);

        let mut router = Router::new()
            .route("/health", get(handlers::health::health_check))
            .nest("/api", api)
            .layer(from_fn_with_state(timeout, middleware::request_timeout))
            .layer(from_fn(middleware::request_logging))
            .with_state(state);

        if self.config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Bind and serve until the process exits
    pub async fn serve(&self) -> Result<(), PresentationError> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Bind and serve until `shutdown` resolves
    pub async fn serve_with_shutdown<F>(&self, shutdown: F) -> Result<(), PresentationError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(self.config.bind_address)
            .await
            .map_err(|e| PresentationError::StartupFailed(format!("Failed to bind to {}: {}", self.config.bind_address, e)))?;

        info!("Vibe API listening on {}", self.config.bind_address);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| PresentationError::ServeFailed(e.to_string()))?;

        info!("Vibe API stopped");
        Ok(())
    }
}

/// Error returned by handlers: a status code plus an [`ErrorBody`]
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

/// Convert core errors to HTTP status codes.
///
/// Validation errors keep their message; anything else is logged and
/// reported with the route's generic `failure_message`.
pub fn handle_core_error(error: CoreError, failure_message: &str) -> ApiError {
    match error {
        CoreError::Validation(message) => ApiError {
            status: StatusCode::BAD_REQUEST,
            message,
        },
        other => {
            error!("{}: {}", failure_message, other);
            ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: failure_message.to_string(),
            }
        }
    }
}
