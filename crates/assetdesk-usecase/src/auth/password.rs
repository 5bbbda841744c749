//! Argon2id password hashing and verification
//!
//! Hashes are stored in PHC string format, so the algorithm parameters and
//! the random salt travel with the hash itself.

use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::warn;

use assetdesk_domain::error::{FieldValidationError, InventoryError, ValidationFailure};
use assetdesk_domain::model::account::PasswordHash;

/// Hash a plaintext password using Argon2id with a random salt
pub fn hash_password(password: &str) -> Result<PasswordHash, InventoryError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| InventoryError::Hashing(err.to_string()))?;
    Ok(PasswordHash::from_phc(hash.to_string()))
}

/// Check a plaintext password against a stored hash
///
/// A stored value that is not a valid PHC string never matches.
pub fn verify_password(password: &str, hash: &PasswordHash) -> bool {
    let parsed = match password_hash::PasswordHash::new(hash.as_str()) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(error = %err, "stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

static DUMMY_HASH: OnceLock<Option<PasswordHash>> = OnceLock::new();

fn dummy_hash() -> Option<&'static PasswordHash> {
    DUMMY_HASH
        .get_or_init(|| hash_password("assetdesk-dummy-password").ok())
        .as_ref()
}

/// Build the dummy hash now so no login attempt pays for it
pub(crate) fn prepare_dummy_hash() {
    dummy_hash();
}

#[cfg(test)]
pub(crate) fn dummy_hash_ready() -> bool {
    DUMMY_HASH.get().is_some()
}

/// Burn the same verification cost as a real login attempt
///
/// Used when no account matches the email, so response time does not
/// reveal which emails are registered.
pub(crate) fn verify_against_dummy(password: &str) {
    if let Some(hash) = dummy_hash() {
        let _ = verify_password(password, hash);
    }
}

/// Reject passwords shorter than `min_length` characters
pub fn validate_password_strength(
    password: &str,
    min_length: usize,
) -> Result<(), FieldValidationError> {
    let actual = password.chars().count();
    if actual == 0 {
        return Err(FieldValidationError::new("password", ValidationFailure::Empty));
    }
    if actual < min_length {
        return Err(FieldValidationError::new(
            "password",
            ValidationFailure::TooShort {
                min: min_length,
                actual,
            },
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");

        assert!(
            hash.as_str().starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("anything", &PasswordHash::from_phc("not-a-phc-string")));
    }

    #[test]
    fn test_prepared_dummy_hash_is_argon2id() {
        prepare_dummy_hash();
        assert!(dummy_hash_ready());
        assert!(dummy_hash().unwrap().as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_password_too_short() {
        let err = validate_password_strength("short", 8).unwrap_err();
        assert_eq!(err.field, "password");
        assert_eq!(err.reason, ValidationFailure::TooShort { min: 8, actual: 5 });
    }

    #[test]
    fn test_password_meets_minimum() {
        assert!(validate_password_strength("eight ch", 8).is_ok());
        assert!(validate_password_strength("", 0).is_err());
    }
}
