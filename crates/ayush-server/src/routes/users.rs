use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use ayush_history::{Profile, User, UserId};
use serde::Deserialize;

use crate::error::ServerResult;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

pub async fn create_user(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CreateUserRequest>,
) -> ServerResult<Json<User>> {
    let history = Arc::clone(&state.history);
    let user = tokio::task::spawn_blocking(move || {
        history.create_user(&request.username, request.email.as_deref())
    })
    .await??;
    Ok(Json(user))
}

/// Look a user up by name. There are no credentials.
pub async fn login(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<Json<User>> {
    Ok(Json(state.history.find_user(&request.username)?))
}

pub async fn profile(
    State(state): State<Arc<ServerState>>,
    Path(user_id): Path<UserId>,
) -> ServerResult<Json<Profile>> {
    Ok(Json(state.history.profile(user_id)?))
}
