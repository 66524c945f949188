//! API routes for the RAG server

pub mod page;
pub mod query;
pub mod status;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status::status))
        .route("/query", post(query::query_rag))
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "resolution-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Question answering over ministry resolutions with cited sources",
        "endpoints": {
            "GET /": "Question page",
            "GET /health": "Liveness",
            "GET /ready": "Readiness (index built and model configured)",
            "GET /api/status": "Index and generation state",
            "POST /api/query": "Answer a question with the chunks it was based on",
            "GET /api/info": "This document"
        }
    }))
}
