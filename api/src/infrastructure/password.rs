//! Argon2id password hashing.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use fintake::auth::{HashError, PasswordHasher};
use fintake::domain::PasswordDigest;

/// Number of random salt bytes drawn per hash.
const SALT_LENGTH: usize = 16;

/// Produces Argon2id digests in PHC string format.
///
/// Digests are self-describing, so parameters can change without
/// invalidating stored accounts.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Creates a hasher with the recommended Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hasher with explicit parameters.
    #[must_use]
    pub const fn with_argon2(argon2: Argon2<'static>) -> Self {
        Self { argon2 }
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, HashError> {
        let salt = SaltString::encode_b64(&rand::random::<[u8; SALT_LENGTH]>())
            .map_err(|error| HashError(error.to_string()))?;

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordDigest::new(hash.to_string()))
            .map_err(|error| HashError(error.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool {
        PasswordHash::new(digest.as_str()).is_ok_and(|parsed| {
            self.argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }
}
