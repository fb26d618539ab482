//! Token claims, signing keys and the codec contract.

use std::fmt;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::control::Fault;

/// Process-wide secret used to sign and verify tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Wraps raw key bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "SigningKey(<{} bytes>)", self.0.len())
    }
}

/// Claims carried by a login token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Email handle of the principal.
    pub email: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    /// Claims for `email` expiring `ttl` from now.
    ///
    /// **Note**: impure (reads the clock).
    #[must_use]
    pub fn expiring_in(email: impl Into<String>, ttl: Duration) -> Self {
        Self {
            email: email.into(),
            exp: (Utc::now() + ttl).timestamp(),
        }
    }

    /// Returns `true` if the claims have expired at `now` (Unix seconds).
    #[must_use]
    pub const fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Client-facing authentication failures.
///
/// Every decode or lookup failure collapses to [`TokenError::Invalid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No token was sent.
    #[error("Token no proporcionado")]
    Missing,
    /// The token was rejected.
    #[error("Token inválido")]
    Invalid,
}

impl From<Fault> for TokenError {
    fn from(_: Fault) -> Self {
        Self::Invalid
    }
}

/// Internal reasons a codec rejects or fails to produce a token.
///
/// These are logged, never shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Wrong number of segments.
    #[error("malformed token")]
    Malformed,
    /// A segment is not valid base64url or JSON.
    #[error("undecodable segment: {0}")]
    Encoding(String),
    /// The header names an algorithm other than the codec's.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// The signature does not match.
    #[error("signature mismatch")]
    Signature,
    /// The `exp` claim has passed.
    #[error("token expired")]
    Expired,
    /// The key cannot be used.
    #[error("invalid key: {0}")]
    Key(String),
}

/// Signs and parses bearer tokens.
pub trait TokenCodec: Send + Sync {
    /// Produces a token carrying `claims`.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be encoded or the key is unusable.
    fn sign(&self, claims: &Claims, key: &SigningKey) -> Result<String, CodecError>;

    /// Verifies `token` against `key` and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns an error for any structural, signature or expiry failure.
    fn parse(&self, token: &str, key: &SigningKey) -> Result<Claims, CodecError>;
}
