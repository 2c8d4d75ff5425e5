// ============================
// crates/backend-lib/src/handlers/directory.rs
// ============================
//! Read-only listings of users and clients. No pagination or filtering.
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use estate_common::{ClientSummary, User};

use crate::error::AppError;
use crate::storage::Store;
use crate::AppState;

/// `GET /api/get-users`
pub async fn list_users<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.storage.list_users().await?))
}

/// `GET /api/users/{id}`
pub async fn get_user<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    state
        .storage
        .get_user(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))
}

/// `GET /api/get-clients`
pub async fn list_clients<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<ClientSummary>>, AppError> {
    Ok(Json(state.storage.list_clients().await?))
}
