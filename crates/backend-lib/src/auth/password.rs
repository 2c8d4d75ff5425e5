// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use zeroize::Zeroize;

/// bcrypt cost factor used for new hashes
pub const DEFAULT_HASH_COST: u32 = 10;

/// bcrypt only reads this many bytes of input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password with bcrypt. The salt is generated per call and embedded
/// in the returned `$2b$` string. Input longer than [`MAX_PASSWORD_BYTES`]
/// is an error rather than being truncated.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::non_truncating_hash(plain, cost)
}

/// Verify a password against a stored hash.
///
/// A wrong password is `Ok(false)`, and so is one too long to have been
/// hashed. Only a hash string that cannot be parsed is an error.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    match bcrypt::non_truncating_verify(plain, hash) {
        Err(bcrypt::BcryptError::Truncation(_)) => Ok(false),
        other => other,
    }
}

/// Hash a password and zeroize the plaintext
pub fn hash_password_secure(plain: &mut String, cost: u32) -> Result<String, bcrypt::BcryptError> {
    let hash = hash_password(plain, cost);
    plain.zeroize();
    hash
}
