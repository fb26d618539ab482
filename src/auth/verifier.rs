//! Token verification.
//!
//! One request moves through `NoToken -> Decoding -> ResolvingPrincipal` and
//! ends `Authenticated` or `Rejected`. Apart from the absent-token case,
//! every rejection carries the same message.

use super::token::{SigningKey, TokenCodec, TokenError};
use crate::control::Outcome;
use crate::domain::Principal;
use crate::repository::IdentityRepository;

/// Resolves the principal behind a bearer token.
///
/// # Errors
///
/// - [`TokenError::Missing`] if `token` is absent or blank.
/// - [`TokenError::Invalid`] if decoding fails for any reason, the handle is
///   unknown, or the lookup itself fails.
pub fn verify_token(
    token: Option<&str>,
    key: &SigningKey,
    codec: &dyn TokenCodec,
    identities: &dyn IdentityRepository,
) -> Outcome<Principal, TokenError> {
    let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) else {
        tracing::debug!("request carried no token");
        return Outcome::failure(TokenError::Missing);
    };

    Outcome::success(token)
        .bind(|token| match codec.parse(token, key) {
            Ok(claims) => Outcome::success(claims),
            Err(error) => {
                tracing::warn!(%error, "token rejected");
                Outcome::failure(TokenError::Invalid)
            }
        })
        .bind(|claims| match identities.find_by_email(&claims.email) {
            Ok(found) => Outcome::success(found),
            Err(error) => {
                tracing::warn!(%error, "principal lookup failed during token verification");
                Outcome::failure(TokenError::Invalid)
            }
        })
        .bind(|found| {
            if found.is_none() {
                tracing::warn!("token names an unknown principal");
            }
            found.map(Principal::from).ok_or(TokenError::Invalid)
        })
}
