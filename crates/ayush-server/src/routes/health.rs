use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;

use crate::state::ServerState;

/// Liveness plus the outcome of the table load.
pub async fn health_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let degraded = state
        .lookup
        .summaries()
        .iter()
        .any(|summary| summary.error.is_some());

    Json(json!({
        "status": if degraded { "degraded" } else { "healthy" },
        "service": "ayush-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "searchable_rows": state.lookup.search_space().len(),
        "merged_rows": state.lookup.merged().len(),
        "tables": state.lookup.summaries(),
    }))
}
