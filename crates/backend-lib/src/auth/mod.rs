// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod session;
pub mod token_generator;
mod service;
mod service_impl;

pub use password::{hash_password, verify_password, DEFAULT_HASH_COST};
pub use session::{Claims, SessionIssuer, SESSION_COOKIE, SESSION_TTL};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
