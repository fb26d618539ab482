//! Authentication: token verification and the credential collaborators.

pub mod password;
pub mod token;
mod verifier;

pub use password::{HashError, PasswordHasher};
pub use token::{Claims, CodecError, SigningKey, TokenCodec, TokenError};
pub use verifier::verify_token;
