//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use keygate_core::error::AuthError;

/// Handles one-way password hashing and verification using Argon2id.
///
/// The digest is self-contained: salt and cost parameters are embedded in
/// the encoded string, so verification needs no external state.
#[derive(Debug, Clone)]
pub struct CredentialHasher;

impl CredentialHasher {
    /// Creates a new credential hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    ///
    /// The plaintext is never logged or persisted.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id digest.
    ///
    /// Returns `false` for both a wrong password and a malformed digest;
    /// the two cases are not distinguishable from the outside.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_round_trip() {
        let hasher = CredentialHasher::new();
        let digest = hasher.hash("Correct-Horse1!").unwrap();
        assert!(hasher.verify("Correct-Horse1!", &digest));
        assert!(!hasher.verify("wrong-password", &digest));
    }

    #[test]
    fn test_hashes_use_distinct_salts() {
        let hasher = CredentialHasher::new();
        let a = hasher.hash("Same-Password1!").unwrap();
        let b = hasher.hash("Same-Password1!").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify("Same-Password1!", &a));
        assert!(hasher.verify("Same-Password1!", &b));
    }

    #[test]
    fn test_malformed_digest_verifies_false() {
        let hasher = CredentialHasher::new();
        assert!(!hasher.verify("anything", "not-a-digest"));
        assert!(!hasher.verify("anything", ""));
    }
}
