// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the Estate Assist API server:
//! credential service, session issuance and the directory endpoints.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use tracing::warn;

use crate::auth::{token_generator, AuthService, DefaultAuth, SessionIssuer};
use crate::config::Settings;
use crate::storage::Store;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Credential service
    pub auth: Arc<dyn AuthService>,
    /// Session token issuer
    pub sessions: Arc<SessionIssuer>,
    /// Settings the server was started with
    pub settings: Arc<Settings>,
    /// Storage backend
    pub storage: S,
}

impl<S: Store + Clone + 'static> AppState<S> {
    /// Create a new application state. Without a configured signing secret
    /// an ephemeral one is generated.
    pub fn new(storage: S, settings: Settings) -> Self {
        let secret = match &settings.auth.jwt_secret {
            Some(secret) => secret.clone(),
            None => {
                warn!("no session secret configured; generated an ephemeral one, sessions will not survive a restart");
                token_generator::generate_secret()
            },
        };

        let sessions = Arc::new(SessionIssuer::from_settings(
            secret.as_bytes(),
            &settings.auth,
        ));
        let auth = Arc::new(DefaultAuth::new(storage.clone(), settings.auth.bcrypt_cost));

        Self {
            auth,
            sessions,
            settings: Arc::new(settings),
            storage,
        }
    }
}
