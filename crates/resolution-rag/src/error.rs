//! Error types for the RAG system

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG system errors
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The hosted model has no credential configured
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// The document file could not be loaded
    #[error("Failed to ingest '{path}': {message}")]
    Ingestion { path: String, message: String },

    /// The index could not be built, so no query can be answered
    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Hosted model call failed
    #[error("Answer generation failed: {0}")]
    Generation(String),

    /// Rejected request input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an ingestion error
    pub fn ingestion(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Ingestion {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Stable machine-readable kind, also used by the page to pick a banner style
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config_error",
            Error::MissingCredential(_) => "configuration_error",
            Error::Ingestion { .. } => "ingestion_error",
            Error::IndexUnavailable(_) => "index_unavailable",
            Error::Embedding(_) => "embedding_error",
            Error::Generation(_) => "generation_error",
            Error::InvalidRequest(_) => "invalid_request",
            Error::Io(_) => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::MissingCredential(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Ingestion { .. } | Error::IndexUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Embedding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Generation(_) => StatusCode::BAD_GATEWAY,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = Json(json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
