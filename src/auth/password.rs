//! Password digests for the mock identity layer.
//!
//! Accounts store a SHA-256 hex digest instead of the raw password. This is
//! deduplication-grade hashing, not a hardened KDF; real credential storage
//! is out of scope for this backend.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hex digest of a password.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Check a password against a stored digest.
pub fn verify_password(password: &str, digest: &str) -> bool {
    hash_password(password) == digest
}
