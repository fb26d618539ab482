//! Registration, login and request authentication.

use super::{PipelineContext, PipelineError, stored};
use crate::auth::{Claims, verify_token};
use crate::control::{Maybe, Outcome};
use crate::domain::{Credentials, Identity, Principal, PrincipalId, Timestamp};
use crate::repository::RepositoryError;
use crate::validation::{CredentialError, RawRequest, parse_json, require_object, validate_credentials};

/// A freshly registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Identifier of the new identity.
    pub id: PrincipalId,
    /// Registered email.
    pub email: String,
}

/// A successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Signed bearer token.
    pub token: String,
    /// The logged-in principal.
    pub principal: Principal,
}

/// Parses and validates a credentials body.
fn credentials_from(request: &RawRequest) -> Outcome<Credentials, PipelineError> {
    parse_json(request)
        .bind(require_object)
        .map_err(CredentialError::from)
        .bind(validate_credentials)
        .map_err(PipelineError::from)
}

/// `parse -> validate -> ensure absent -> hash -> insert`.
///
/// # Errors
///
/// Structural and credential failures from validation,
/// [`CredentialError::AlreadyRegistered`] if the email exists (including a
/// concurrent registration that wins the insert), and resource failures
/// from the store or hasher.
pub fn register(context: &PipelineContext, request: &RawRequest) -> Outcome<Registration, PipelineError> {
    credentials_from(request)
        .bind(|credentials| {
            stored(context.identities.find_by_email(&credentials.email)).bind(|existing| {
                match existing {
                    Maybe::Some(_) => {
                        tracing::debug!(email = %credentials.email, "registration rejected: email taken");
                        Outcome::failure(CredentialError::AlreadyRegistered.into())
                    }
                    Maybe::None => Outcome::success(credentials),
                }
            })
        })
        .bind(|credentials| {
            Outcome::from(context.hasher.hash(&credentials.password))
                .map_err(PipelineError::from)
                .map(|digest| Identity {
                    id: PrincipalId::generate(),
                    email: credentials.email,
                    password_digest: digest,
                    created_at: Timestamp::now(),
                })
        })
        .bind(|identity| {
            let registration = Registration {
                id: identity.id,
                email: identity.email.clone(),
            };
            match context.identities.insert(identity) {
                Ok(()) => Outcome::success(registration),
                Err(RepositoryError::DuplicateEmail(_)) => {
                    Outcome::failure(CredentialError::AlreadyRegistered.into())
                }
                Err(error) => stored(Err(error)),
            }
        })
        .map(|registration| {
            tracing::info!(id = %registration.id, email = %registration.email, "identity registered");
            registration
        })
}

/// `parse -> validate -> lookup -> verify secret -> sign`.
///
/// An unknown email and a wrong password fail identically.
///
/// # Errors
///
/// Structural and credential failures from validation,
/// [`CredentialError::Incorrect`] for bad credentials, and resource failures
/// from the store or codec.
pub fn login(context: &PipelineContext, request: &RawRequest) -> Outcome<Session, PipelineError> {
    credentials_from(request)
        .bind(|credentials| {
            stored(context.identities.find_by_email(&credentials.email))
                .bind(|found| found.ok_or(CredentialError::Incorrect.into()))
                .bind(|identity| {
                    if context
                        .hasher
                        .verify(&credentials.password, &identity.password_digest)
                    {
                        Outcome::success(Principal::from(identity))
                    } else {
                        Outcome::failure(CredentialError::Incorrect.into())
                    }
                })
        })
        .bind(|principal| {
            let claims = Claims::expiring_in(principal.email.clone(), context.token_ttl);
            Outcome::from(context.codec.sign(&claims, &context.signing_key))
                .map_err(PipelineError::from)
                .map(|token| Session { token, principal })
        })
        .map(|session| {
            tracing::info!(email = %session.principal.email, "login succeeded");
            session
        })
}

/// Resolves the principal behind `token`.
///
/// # Errors
///
/// [`TokenError`](crate::auth::TokenError) failures, always one of the two
/// uniform messages.
pub fn authenticate(context: &PipelineContext, token: Option<&str>) -> Outcome<Principal, PipelineError> {
    verify_token(
        token,
        &context.signing_key,
        context.codec.as_ref(),
        context.identities.as_ref(),
    )
    .map_err(PipelineError::from)
}
