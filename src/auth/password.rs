//! Password hashing and verification (bcrypt).

use super::AuthError;

/// Work factor chosen to keep offline brute force expensive.
const BCRYPT_COST: u32 = 12;

/// Hash a plaintext password. bcrypt at this cost takes on the order of
/// hundreds of milliseconds, so the work runs on the blocking pool.
pub async fn hash(plain: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(plain, BCRYPT_COST))
        .await
        .map_err(|e| AuthError::Hashing(format!("hash task failed: {}", e)))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Compare a plaintext password against a stored hash.
pub async fn verify(plain: String, hashed: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hashed))
        .await
        .map_err(|e| AuthError::Hashing(format!("verify task failed: {}", e)))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}
