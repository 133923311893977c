//! Salted one-way password hashing.
//!
//! # Responsibility
//! - Derive a PHC-format Argon2id hash with a fresh random salt per call.
//! - Verify a plaintext candidate against a stored hash.
//!
//! # Invariants
//! - The plaintext is never stored or logged; only the hash leaves this module.
//! - Verification failure is indistinguishable between wrong password and
//!   unparsable stored hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PasswordResult<T> = Result<T, PasswordHashError>;

/// Failure while deriving a password hash.
#[derive(Debug)]
pub struct PasswordHashError(argon2::password_hash::Error);

impl Display for PasswordHashError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to derive password hash: {}", self.0)
    }
}

impl Error for PasswordHashError {}

/// Hashes a plaintext password with a fresh random salt.
///
/// Returns the self-describing PHC string (algorithm, parameters, salt and
/// digest), suitable for direct column storage.
pub fn hash_password(plaintext: &str) -> PasswordResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordHashError)
}

/// Verifies a plaintext candidate against a stored PHC hash string.
///
/// Returns `false` for a mismatch and for a stored value that does not
/// parse as a PHC string, so callers cannot tell the two apart.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};

    #[test]
    fn hash_verifies_and_never_equals_plaintext() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn same_plaintext_hashes_differently_per_salt() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("hunter2", &first));
        assert!(verify_password("hunter2", &second));
    }

    #[test]
    fn unparsable_stored_hash_verifies_as_false() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
        assert!(!verify_password("hunter2", ""));
    }
}
