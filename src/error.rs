//! Error types for the offline agent
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Agent Error Enum ==
/// Unified error type for the offline agent.
#[derive(Error, Debug)]
pub enum AgentError {
    /// A seed resource could not be cached during install
    #[error("Install failed: {0}")]
    InstallFailed(String),

    /// Live network fetch failed
    #[error("Network error: {0}")]
    Network(String),

    /// The cache rejected a write
    #[error("Cache write rejected: {0}")]
    CacheWrite(String),

    /// A push payload or event body could not be parsed
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A page-context operation failed
    #[error("Client error: {0}")]
    Client(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AgentError::InstallFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AgentError::Network(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AgentError::CacheWrite(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AgentError::InvalidPayload(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AgentError::Client(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the offline agent.
pub type Result<T> = std::result::Result<T, AgentError>;
