use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use ayush_history::UserId;
use ayush_model::{LookupError, Resolution};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::ServerResult;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub disease_text: String,
    /// Minimum fuzzy score, 0 to 100
    #[serde(default)]
    pub fuzzy_threshold: Option<f64>,
    /// Maximum fuzzy suggestions
    #[serde(default)]
    pub fuzzy_top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub user_id: Option<UserId>,
    pub result: Resolution,
}

/// Resolve a disease name to Siddha/Unani codes.
pub async fn lookup(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<LookupRequest>,
) -> ServerResult<Json<LookupResponse>> {
    let text = request.disease_text.trim();
    if text.is_empty() {
        return Err(LookupError::invalid_input("disease_text is required").into());
    }
    let options = state
        .config
        .resolve_options(request.fuzzy_top_k, request.fuzzy_threshold);
    let result = state.lookup.resolve(text, &options)?;
    debug!(matched = result.is_match(), "lookup answered");

    Ok(Json(LookupResponse {
        user_id: request.user_id,
        result,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SaveLookupRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub disease_text: String,
    pub result: Value,
}

/// Store a lookup result in the history.
///
/// File-backed history writes on a blocking thread.
pub async fn save_lookup(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SaveLookupRequest>,
) -> ServerResult<impl IntoResponse> {
    let history = Arc::clone(&state.history);
    let record = tokio::task::spawn_blocking(move || {
        history.save_lookup(request.user_id, &request.disease_text, request.result)
    })
    .await??;
    Ok(Json(json!({
        "message": "Lookup saved successfully",
        "id": record.id,
        "created_at": record.created_at,
    })))
}
