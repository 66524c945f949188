//! Query endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{QueryRequest, QueryResponse};

/// POST /api/query - Answer a question from the indexed resolutions
pub async fn query_rag(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>> {
    let start = Instant::now();

    // Unavailable states take precedence over input validation so the page
    // can show its banner for any submission
    let index = state.index().await?;
    state.llm().check_configured()?;

    // Body errors use the same JSON error shape as every other failure
    let Json(request) = payload.map_err(|e| Error::InvalidRequest(e.body_text()))?;
    let question = request.validated_question()?;

    let retrieval = &state.config().retrieval;
    let k = request.effective_top_k(retrieval.top_k, retrieval.max_top_k);

    tracing::info!("Query: \"{}\" (k={})", question, k);

    let result = state.pipeline(index).query(question, k).await?;

    let processing_time_ms = start.elapsed().as_millis() as u64;
    tracing::info!("Query answered in {}ms", processing_time_ms);

    Ok(Json(QueryResponse::from_result(&result, processing_time_ms)))
}
