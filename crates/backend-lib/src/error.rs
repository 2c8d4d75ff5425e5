// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::validation::ValidationError;

/// Message shared by both login failure paths so the response never reveals
/// whether the email exists.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email already in use")]
    DuplicateUser,

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateUser => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Hashing(_)
            | AppError::Token(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::InvalidInput(_) => "VAL_002",
            AppError::DuplicateUser => "AUTH_004",
            AppError::InvalidCredentials => "AUTH_002",
            AppError::NotFound(_) => "NF_001",
            AppError::Database(_) => "DB_001",
            AppError::Hashing(_) => "HASH_001",
            AppError::Token(_) => "TOKEN_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Message safe to hand to the client. Server-side faults never leak
    /// their details.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::DuplicateUser => "Email already in use".to_string(),
            AppError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::Database(_)
            | AppError::Hashing(_)
            | AppError::Token(_)
            | AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if status.is_server_error() {
            tracing::error!(code = error_code, error = %self, "request failed");
        }

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": self.public_message(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
