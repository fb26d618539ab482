//! Password hashing contract.

use thiserror::Error;

use crate::domain::PasswordDigest;

/// The hashing collaborator failed to produce a digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(pub String);

/// Produces and checks password digests.
pub trait PasswordHasher: Send + Sync {
    /// Hashes `password` into a self-describing digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the digest cannot be produced.
    fn hash(&self, password: &str) -> Result<PasswordDigest, HashError>;

    /// Returns `true` if `password` matches `digest`.
    ///
    /// Malformed digests never match.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool;
}
