use async_trait::async_trait;
use estate_common::{Role, User};
use metrics::counter;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::auth::{password, AuthService};
use crate::error::AppError;
use crate::metrics::{AUTH_LOGIN_FAILURE, AUTH_LOGIN_SUCCESS, AUTH_REGISTER};
use crate::storage::{NewUser, Store};

/// `AuthService` backed by a `Store` and bcrypt
pub struct DefaultAuth<S> {
    store: S,
    cost: u32,
    /// Checked against on unknown-email logins so both failures cost one
    /// bcrypt verify
    dummy_hash: OnceCell<String>,
}

impl<S: Store> DefaultAuth<S> {
    pub fn new(store: S, cost: u32) -> Self {
        Self {
            store,
            cost,
            dummy_hash: OnceCell::new(),
        }
    }

    async fn dummy_hash(&self) -> Result<&str, AppError> {
        let cost = self.cost;
        let hash = self
            .dummy_hash
            .get_or_try_init(|| blocking(move || password::hash_password("unknown-account", cost)))
            .await?;
        Ok(hash)
    }
}

// bcrypt is deliberately slow; keep it off the async worker threads.
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
        .map_err(AppError::from)
}

#[async_trait]
impl<S: Store> AuthService for DefaultAuth<S> {
    async fn register(
        &self,
        email: &str,
        mut password: String,
        name: &str,
        role: Role,
    ) -> Result<User, AppError> {
        if self.store.find_user_by_email(email).await?.is_some() {
            return Err(AppError::DuplicateUser);
        }

        let cost = self.cost;
        let password_hash =
            blocking(move || password::hash_password_secure(&mut password, cost)).await?;

        let record = self
            .store
            .insert_user(NewUser {
                email: email.to_string(),
                name: name.to_string(),
                password_hash,
                role,
            })
            .await?;

        counter!(AUTH_REGISTER).increment(1);
        info!(user_id = %record.id, role = %role, "user registered");

        record.into_user()
    }

    async fn verify_password(&self, plain: &str, hash: &str) -> Result<bool, AppError> {
        let plain = plain.to_string();
        let hash = hash.to_string();
        blocking(move || password::verify_password(&plain, &hash)).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let Some(record) = self.store.find_user_by_email(email).await? else {
            let dummy = self.dummy_hash().await?;
            self.verify_password(password, dummy).await?;
            counter!(AUTH_LOGIN_FAILURE).increment(1);
            warn!("login rejected: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !self.verify_password(password, &record.password_hash).await? {
            counter!(AUTH_LOGIN_FAILURE).increment(1);
            warn!(user_id = %record.id, "login rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        counter!(AUTH_LOGIN_SUCCESS).increment(1);
        info!(user_id = %record.id, "login succeeded");

        record.into_user()
    }
}
