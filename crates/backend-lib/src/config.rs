// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::Path;

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::auth::password::DEFAULT_HASH_COST;
use crate::auth::session::{SESSION_COOKIE, SESSION_TTL};
use crate::validation::MIN_PASSWORD_LENGTH;

/// Prefix for environment overrides, e.g. `ESTATE_AUTH__JWT_SECRET`
pub const ENV_PREFIX: &str = "ESTATE_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Relational store settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseSettings {
    /// sqlx connection URL
    pub url: String,
    pub max_connections: u32,
}

/// Credential and session settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSettings {
    /// Shared secret for signing session tokens. Generated at startup when
    /// absent.
    pub jwt_secret: Option<String>,
    pub session_ttl_secs: u64,
    pub bcrypt_cost: u32,
    pub cookie_name: String,
    /// Mark the session cookie `Secure` (HTTPS only)
    pub cookie_secure: bool,
    pub password_min_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            database: DatabaseSettings::default(),
            auth: AuthSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://estate.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            session_ttl_secs: SESSION_TTL.as_secs(),
            bcrypt_cost: DEFAULT_HASH_COST,
            cookie_name: SESSION_COOKIE.to_string(),
            cookie_secure: false,
            password_min_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` / `config.json` in the working
    /// directory plus the environment
    pub fn load() -> Result<Self> {
        Self::layered(Path::new("config.toml"))
    }

    /// Load settings from an explicit TOML file in place of `config.toml`.
    /// `config.json` and the environment still apply on top.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        Self::layered(path)
    }

    // defaults < TOML < config.json < ESTATE_* env
    fn layered(toml: &Path) -> Result<Self> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(toml))
            .merge(Json::file("config.json"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            bail!("invalid log level: {}", self.log_level);
        }
        if self.auth.session_ttl_secs == 0 {
            bail!("session TTL must be positive");
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            bail!("bcrypt cost must be between 4 and 31");
        }
        if self.auth.password_min_length < MIN_PASSWORD_LENGTH {
            bail!("password minimum length cannot be below {MIN_PASSWORD_LENGTH}");
        }
        if self.auth.cookie_name.is_empty() {
            bail!("cookie name must not be empty");
        }
        if self.database.max_connections == 0 {
            bail!("database pool needs at least one connection");
        }
        Ok(())
    }

    /// Address to bind the HTTP listener to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.server.host, self.server.port))
    }
}
