// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router.
use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{auth, directory};
use crate::storage::Store;
use crate::AppState;

/// Create the API router. Each route answers 405 with an `Allow` header to
/// any other method.
pub fn create_router<S: Store + Clone + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/auth/register", post(auth::register::<S>))
        .route("/api/auth/login", post(auth::login::<S>))
        .route("/api/get-users", get(directory::list_users::<S>))
        .route("/api/users/{id}", get(directory::get_user::<S>))
        .route("/api/get-clients", get(directory::list_clients::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
