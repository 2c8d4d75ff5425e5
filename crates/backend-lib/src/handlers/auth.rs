// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Register and login endpoints.
use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use estate_common::{LoginRequest, LoginResponse, LoginUser, RegisterRequest, Role, User};
use metrics::counter;

use crate::error::AppError;
use crate::metrics::SESSION_ISSUED;
use crate::storage::Store;
use crate::validation::{validate_login, validate_registration, ValidLogin};
use crate::AppState;

/// `POST /api/auth/register`
///
/// Responds 201 with the new user (no hash), 400 on invalid input, 409 when
/// the email is already registered.
pub async fn register<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let Json(req) = payload?;
    let valid = validate_registration(req, state.settings.auth.password_min_length)?;

    let user = state
        .auth
        .register(&valid.email, valid.password, &valid.name, Role::User)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /api/auth/login`
///
/// On success sets the session cookie and echoes `{id, email, name}`.
pub async fn login<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let Json(req) = payload?;
    let ValidLogin { email, password } = validate_login(req)?;

    let user = state.auth.login(&email, &password).await?;
    let token = state.sessions.issue(&user)?;
    counter!(SESSION_ISSUED).increment(1);

    let body = LoginResponse {
        user: LoginUser::from(&user),
    };
    Ok((jar.add(state.sessions.cookie(token)), Json(body)))
}
