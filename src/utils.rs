use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::AppError;

/// Hash a password with argon2 and a fresh random salt, returning the PHC
/// string that goes into the `password` column.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))
        .map_err(|e| {
            log::error!("Failed to hash password: {}", e);
            AppError::Password(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Verify a provided password against a stored PHC string. An unparseable
/// hash counts as a failed verification, not an error.
pub fn verify_password(provided: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(provided.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

/// Trim a string input. Required text columns store the trimmed value as-is,
/// an empty string stays an empty string rather than becoming NULL.
pub fn safe(s: &str) -> String {
    s.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("hunter42x").unwrap();
        assert!(verify_password("hunter42x", &hash));
        assert!(!verify_password("hunter42y", &hash));
    }

    #[test]
    fn two_hashes_of_same_password_differ() {
        let a = hash_password("hunter42x").unwrap();
        let b = hash_password("hunter42x").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn safe_trims_and_keeps_empty() {
        assert_eq!(safe("  widget  "), "widget");
        assert_eq!(safe("   "), "");
    }
}
