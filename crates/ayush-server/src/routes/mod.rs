//! API route handlers
//!
//! - `health`: liveness and loaded-table summary
//! - `lookup`: disease-name resolution and saving results
//! - `users`: user registration, login and profiles
//! - `fhir`: clinical form reshaping and transaction bundles

pub mod fhir;
pub mod health;
pub mod lookup;
pub mod users;

use axum::Json;
use axum::response::IntoResponse;
use serde_json::json;

use crate::error::ServerError;

/// Service name, version and endpoint list (`GET /`).
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "message": "AYUSH Lookup API running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/health",
            "/lookup",
            "/save_lookup",
            "/users",
            "/login",
            "/profile/{user_id}",
            "/fhir_resource",
            "/fhir_bundle"
        ]
    }))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
