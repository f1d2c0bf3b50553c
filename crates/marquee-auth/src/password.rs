//! Password verification.
//!
//! Hashing lives next to storage in the repository; this module only
//! checks submitted passwords against stored Argon2id hashes.

use argon2::{Argon2, PasswordVerifier};

use crate::error::AuthError;

/// Verify a password against an Argon2id PHC hash.
///
/// Returns `Ok(false)` on mismatch. A hash that cannot be parsed is an
/// error, not a failed login.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("password verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    #[test]
    fn correct_password_verifies() {
        let stored = hash("open sesame");
        assert!(verify_password("open sesame", &stored).unwrap());
    }

    #[test]
    fn wrong_password_fails_without_error() {
        let stored = hash("open sesame");
        assert!(!verify_password("close sesame", &stored).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let err = verify_password("anything", "garbage").unwrap_err();
        assert!(matches!(err, AuthError::Crypto(_)));
    }
}
