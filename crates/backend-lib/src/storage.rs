// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Storage abstraction with a SQLite implementation.
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use estate_common::{ClientSummary, Role, User};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

/// A stored user, hash included. Never leaves the backend.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Strip the password hash
    pub fn into_user(self) -> Result<User, AppError> {
        let role = Role::from_str(&self.role).map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(User {
            id: self.id,
            email: self.email,
            name: self.name,
            role,
            created_at: self.created_at,
        })
    }
}

/// Fields needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
}

/// Trait for storage backends
#[async_trait]
pub trait Store: Send + Sync {
    /// Look up a user by exact email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    /// Insert a user. A taken email is `AppError::DuplicateUser`.
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, AppError>;

    /// Get one user by id
    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError>;

    /// All users, newest first
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Create a client assigned to `user_id`, which must exist
    async fn insert_client(&self, user_id: &str, name: &str) -> Result<ClientSummary, AppError>;

    /// All clients
    async fn list_clients(&self) -> Result<Vec<ClientSummary>, AppError>;
}

/// SQLite implementation of the Store trait
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `url` and bring the schema up to date
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// A private in-memory database. Each connection to `sqlite::memory:`
    /// sees its own database, so the pool is pinned to one connection that
    /// is never recycled.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait]
impl Store for SqliteStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, name, password_hash, role, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, AppError> {
        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            role: user.role.as_str().to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO users (id, email, name, password_hash, role, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.email)
        .bind(&record.name)
        .bind(&record.password_hash)
        .bind(&record.role)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateUser
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(record)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, name, password_hash, role, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record.map(UserRecord::into_user).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let records = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, name, password_hash, role, created_at FROM users \
             ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(UserRecord::into_user).collect()
    }

    async fn insert_client(&self, user_id: &str, name: &str) -> Result<ClientSummary, AppError> {
        let client = ClientSummary {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        };

        sqlx::query("INSERT INTO clients (id, user_id, name, created_at) VALUES (?, ?, ?, ?)")
            .bind(&client.id)
            .bind(user_id)
            .bind(&client.name)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::NotFound(format!("user {user_id}"))
                } else {
                    AppError::Database(e)
                }
            })?;

        Ok(client)
    }

    async fn list_clients(&self) -> Result<Vec<ClientSummary>, AppError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT id, name FROM clients ORDER BY created_at, rowid")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| ClientSummary { id, name })
            .collect())
    }
}
