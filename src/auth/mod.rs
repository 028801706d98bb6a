//! Authentication and authorization.
//!
//! Three pieces: salted password digests, explicit session objects behind
//! an injected [`SessionStore`], and the single capability check
//! [`has_permission`] that all role branching goes through.

pub mod permissions;
pub mod session;

pub use permissions::{has_permission, Capability, Role};
pub use session::{MemorySessionStore, Session, SessionStore};

use sha2::{Digest, Sha256};

/// Salted sha256 digest of a password, hex encoded.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-shape verification against a stored digest.
pub fn verify_password(salt: &str, password: &str, digest: &str) -> bool {
    hash_password(salt, password) == digest
}
