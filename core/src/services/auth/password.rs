//! Password hashing and verification.
//!
//! Bcrypt does the hashing and the constant-time comparison. When the
//! submitted email matches no account, the verifier still runs one bcrypt
//! verification against a fixed dummy hash so that the unknown-email and
//! wrong-password paths cost the same.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::{DomainError, DomainResult};

/// A valid bcrypt hash of an unguessable throwaway input, used to equalize
/// timing when no account matches the submitted email.
const DUMMY_HASH: &str = "$2b$12$SSkGwBHQArLaDiDmdpmhr.ZbYaDz5IJwWlLRXc6iSCidYwqy3vxJu";

/// Hash a plaintext password with bcrypt at the default cost.
pub fn hash_password(password: &str) -> DomainResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Password hashing failed: {}", e),
    })
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch rather than an error; the
/// caller's answer to the client is the same either way.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}

/// Burn one bcrypt verification without an account. Always returns false.
pub fn verify_against_dummy(password: &str) -> bool {
    verify(password, DUMMY_HASH).unwrap_or(false) && false
}
