use anyhow::{Context as _, anyhow};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};

use crate::error::MinistryServiceError;

/// Hash a plaintext password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, MinistryServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Hash on the blocking pool; argon2 is deliberately slow.
pub async fn hash_password_blocking(password: String) -> Result<String, MinistryServiceError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("join password hashing task")?
}

/// Check a plaintext password against a stored PHC string.
/// A malformed stored hash never verifies.
#[cfg(test)]
pub(crate) fn verify_password(password: &str, password_hash: &str) -> bool {
    use argon2::PasswordVerifier;
    use argon2::password_hash::PasswordHash;

    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
