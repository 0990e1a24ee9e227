//! Password verification
//!
//! Stored passwords are either plaintext (compared directly) or argon2 PHC
//! strings. Argon2 verification is CPU-intensive, so the async variant runs
//! it on the blocking pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

const ARGON2_PREFIX: &str = "$argon2";

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2, for producing credential config entries
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Whether a stored password is an argon2 hash rather than plaintext
    #[inline]
    pub fn is_hashed(stored: &str) -> bool {
        stored.starts_with(ARGON2_PREFIX)
    }

    /// Reject stored passwords that look hashed but are not a usable PHC string
    pub fn check_stored(stored: &str) -> Result<()> {
        if !Self::is_hashed(stored) {
            return Ok(());
        }

        let parsed =
            PasswordHash::new(stored).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        if parsed.hash.is_none() {
            anyhow::bail!("Invalid hash format: missing hash output");
        }
        Ok(())
    }

    /// Verify a candidate against a stored password (blocking for hashes)
    pub fn verify(candidate: &str, stored: &str) -> Result<bool> {
        if !Self::is_hashed(stored) {
            return Ok(candidate == stored);
        }

        let parsed_hash =
            PasswordHash::new(stored).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        Ok(Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Verify asynchronously; hashes are checked on the blocking thread pool
    pub async fn verify_async(candidate: String, stored: String) -> Result<bool> {
        if !Self::is_hashed(&stored) {
            return Ok(candidate == stored);
        }

        tokio::task::spawn_blocking(move || Self::verify(&candidate, &stored))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
