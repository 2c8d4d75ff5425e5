use async_trait::async_trait;
use estate_common::{Role, User};

use crate::error::AppError;

/// Credential operations: registration, password checks and login
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a user with a freshly salted hash of `password`.
    /// Fails with `AppError::DuplicateUser` when the email is taken.
    async fn register(
        &self,
        email: &str,
        password: String,
        name: &str,
        role: Role,
    ) -> Result<User, AppError>;

    /// `Ok(false)` for a wrong password; errors only on a malformed hash
    async fn verify_password(&self, plain: &str, hash: &str) -> Result<bool, AppError>;

    /// Authenticate by email and password. Unknown email and wrong password
    /// both yield `AppError::InvalidCredentials`.
    async fn login(&self, email: &str, password: &str) -> Result<User, AppError>;
}
