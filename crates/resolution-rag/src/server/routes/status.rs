//! Status endpoint backing the page banners

use axum::{extract::State, Json};
use serde::Serialize;

use crate::retrieval::IndexState;
use crate::server::state::AppState;

/// Whether answers can be generated
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GenerationState {
    Configured { provider: String, model: String },
    MissingCredential { message: String },
}

/// Response of GET /api/status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub index: IndexState,
    pub generation: GenerationState,
    pub data_path: String,
    pub embedding_provider: String,
}

/// GET /api/status - Index and generation state
///
/// Triggers the index build when it has not happened yet, so the first page
/// load reports a missing or malformed file.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    // The outcome is read back through `index_state`
    let _ = state.index().await;

    let llm = state.llm();
    let generation = match llm.check_configured() {
        Ok(()) => GenerationState::Configured {
            provider: llm.name().to_string(),
            model: llm.model().to_string(),
        },
        Err(e) => GenerationState::MissingCredential {
            message: e.to_string(),
        },
    };

    Json(StatusResponse {
        index: state.index_state(),
        generation,
        data_path: state.config().data.path.display().to_string(),
        embedding_provider: state.embedder().name().to_string(),
    })
}
