// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Signed session tokens and the cookie that carries them.
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use estate_common::{Role, User};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AuthSettings;

/// Default session lifetime
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60); // 1 hour

/// Default name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Payload signed into every session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub id: String,
    pub email: String,
    pub role: Role,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// Mints and checks HS256 session tokens with a shared secret
#[derive(Clone)]
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    cookie_name: String,
    cookie_secure: bool,
}

impl SessionIssuer {
    /// Create an issuer with the default one-hour TTL and cookie settings
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: SESSION_TTL,
            cookie_name: SESSION_COOKIE.to_string(),
            cookie_secure: false,
        }
    }

    /// Create an issuer from the auth section of the settings
    pub fn from_settings(secret: &[u8], auth: &AuthSettings) -> Self {
        Self {
            ttl: Duration::from_secs(auth.session_ttl_secs),
            cookie_name: auth.cookie_name.clone(),
            cookie_secure: auth.cookie_secure,
            ..Self::new(secret)
        }
    }

    /// Sign a token asserting `user`'s identity and role
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            iat,
            exp: iat + self.ttl.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Check signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    /// Wrap a token in an HTTP-only, same-site session cookie
    pub fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .max_age(time::Duration::seconds(self.ttl.as_secs() as i64))
            .build()
    }
}
