// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request validation module.

use estate_common::{LoginRequest, RegisterRequest};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::auth::password::MAX_PASSWORD_BYTES;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

// something@something.tld, no whitespace anywhere
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Possible validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    MissingFields(String),

    #[error("{0}")]
    InvalidEmail(String),

    #[error("{0}")]
    InvalidPassword(String),

    #[error("{0}")]
    InvalidName(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A registration request whose fields have all been checked
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A login request with both fields present
#[derive(Debug, Clone)]
pub struct ValidLogin {
    pub email: String,
    pub password: String,
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a password against the configured minimum length
pub fn validate_password(password: &str, min_length: usize) -> ValidationResult<&str> {
    // Minimum counts characters; the maximum is bcrypt's byte limit
    if password.chars().count() < min_length {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at least {min_length} characters long"
        )));
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_BYTES} bytes"
        )));
    }

    Ok(password)
}

/// Validate a display name
pub fn validate_name(name: &str) -> ValidationResult<&str> {
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidName(
            "Name must not be blank".to_string(),
        ));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::InvalidName(format!(
            "Name must be between 1 and {MAX_NAME_LENGTH} characters"
        )));
    }

    Ok(name)
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}

/// Validate a registration body
pub fn validate_registration(
    req: RegisterRequest,
    min_password_length: usize,
) -> ValidationResult<ValidRegistration> {
    let (Some(name), Some(email), Some(password)) =
        (present(req.name), present(req.email), present(req.password))
    else {
        return Err(ValidationError::MissingFields(
            "Missing required fields".to_string(),
        ));
    };

    validate_email(&email)?;
    validate_password(&password, min_password_length)?;
    validate_name(&name)?;

    Ok(ValidRegistration { name, email, password })
}

/// Validate a login body. Only presence is checked here; a malformed email
/// simply fails authentication.
pub fn validate_login(req: LoginRequest) -> ValidationResult<ValidLogin> {
    match (present(req.email), present(req.password)) {
        (Some(email), Some(password)) => Ok(ValidLogin { email, password }),
        _ => Err(ValidationError::MissingFields(
            "Email and password are required".to_string(),
        )),
    }
}
