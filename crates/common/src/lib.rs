// ================
// crates/common/src/lib.rs
// ================
//! Wire types shared by the Estate Assist backend and its clients.
//! Everything here is what crosses the HTTP boundary: sanitized user
//! records, client summaries and the auth request/response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of an agency worker account
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Administrative staff account
    Admin,
    /// Regular agency worker
    #[default]
    User,
}

impl Role {
    /// Canonical upper-case form, as stored and serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role string is not one of `ADMIN` / `USER`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A user record with the password hash stripped
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A client (lead) as returned by the listing endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientSummary {
    pub id: String,
    pub name: String,
}

/// Body of `POST /api/auth/register`
///
/// Fields are optional so that a missing field surfaces as a validation
/// error rather than a deserialization failure.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /api/auth/login`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Identity echoed back after a successful login
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<&User> for LoginUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Body of a successful `POST /api/auth/login` response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub user: LoginUser,
}
