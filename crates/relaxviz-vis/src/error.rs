//! Error types for relaxviz-vis.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Result type for visualization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sessions, configuration and the API.
#[derive(Debug, Error)]
pub enum Error {
    /// Graph validation or trace generation failed.
    #[error(transparent)]
    Engine(#[from] relaxviz_engine::Error),

    /// The graph is outside the vertex range the visualizer accepts.
    #[error("Number of vertices must be between {min} and {max} (got {count})")]
    VertexCount { count: usize, min: usize, max: usize },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<relaxviz_engine::InvalidGraph> for Error {
    fn from(e: relaxviz_engine::InvalidGraph) -> Self {
        Error::Engine(e.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Engine(_) | Error::VertexCount { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!("Request failed: {}", self);
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
