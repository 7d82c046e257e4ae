//! Password hashing utilities
//!
//! bcrypt is CPU-bound; the async variants run it on the blocking pool so
//! request tasks never stall the runtime.

use bcrypt::{hash, verify};

pub use bcrypt::DEFAULT_COST;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
#[cfg(test)]
pub(crate) const TEST_COST: u32 = 4;

use crate::shared::InfraError;

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

/// [`hash_password`] on a blocking worker thread.
pub async fn hash_password_async(password: String, cost: u32) -> Result<String, InfraError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| InfraError::Crypto(format!("hash task failed: {}", e)))?
        .map_err(|e| InfraError::Crypto(format!("Failed to hash password: {}", e)))
}

/// [`verify_password`] on a blocking worker thread. A malformed hash
/// counts as a mismatch.
pub async fn verify_password_async(password: String, hash: String) -> Result<bool, InfraError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash).unwrap_or(false))
        .await
        .map_err(|e| InfraError::Crypto(format!("verify task failed: {}", e)))
}
