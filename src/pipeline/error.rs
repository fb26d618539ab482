//! The error type shared by every per-endpoint pipeline.

use thiserror::Error;

use crate::auth::{CodecError, HashError, TokenError};
use crate::control::Fault;
use crate::repository::RepositoryError;
use crate::validation::{CredentialError, FinancialError, PayloadError, PersonalRecordError};

/// Coarse classification of a pipeline failure.
///
/// The boundary maps kinds to transport statuses; the pipeline never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Missing or malformed JSON.
    Structural,
    /// Absent or rejected token.
    Authentication,
    /// A field-level rule violation.
    Validation,
    /// The resource already exists.
    Conflict,
    /// Unknown email or wrong password.
    InvalidCredentials,
    /// A collaborator failed.
    Resource,
    /// A panic captured inside a stage.
    Fault,
}

/// Failure of a per-endpoint pipeline.
///
/// `Display` is the client-facing message, verbatim from the failing stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Structural failure.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Authentication failure.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Credential, registration or login failure.
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// Financial validation failure.
    #[error(transparent)]
    Financial(#[from] FinancialError),

    /// Personal-record validation failure.
    #[error(transparent)]
    Personal(#[from] PersonalRecordError),

    /// Storage failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Password hashing failure.
    #[error(transparent)]
    Hashing(#[from] HashError),

    /// Token signing failure at login.
    #[error("Error al generar el token: {0}")]
    Signing(#[from] CodecError),

    /// Fault captured by a combinator.
    #[error("{0}")]
    Fault(Fault),
}

impl From<Fault> for PipelineError {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

impl PipelineError {
    /// Classifies the failure.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Payload(error)
            | Self::Credentials(CredentialError::Payload(error))
            | Self::Financial(FinancialError::Payload(error))
            | Self::Personal(PersonalRecordError::Payload(error)) => payload_kind(error),
            Self::Token(_) => FailureKind::Authentication,
            Self::Credentials(CredentialError::AlreadyRegistered) => FailureKind::Conflict,
            Self::Credentials(CredentialError::Incorrect) => FailureKind::InvalidCredentials,
            Self::Credentials(CredentialError::Fault(_))
            | Self::Financial(FinancialError::Fault(_))
            | Self::Personal(PersonalRecordError::Fault(_))
            | Self::Fault(_) => FailureKind::Fault,
            Self::Credentials(_) | Self::Financial(_) | Self::Personal(_) => FailureKind::Validation,
            Self::Repository(RepositoryError::DuplicateEmail(_)) => FailureKind::Conflict,
            Self::Repository(_) | Self::Hashing(_) | Self::Signing(_) => FailureKind::Resource,
        }
    }
}

const fn payload_kind(error: &PayloadError) -> FailureKind {
    match error {
        PayloadError::Fault(_) => FailureKind::Fault,
        PayloadError::NotJson | PayloadError::Empty | PayloadError::NotAnObject => {
            FailureKind::Structural
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PayloadError::NotJson.into(), FailureKind::Structural)]
    #[case(CredentialError::Payload(PayloadError::Empty).into(), FailureKind::Structural)]
    #[case(TokenError::Missing.into(), FailureKind::Authentication)]
    #[case(CredentialError::Required.into(), FailureKind::Validation)]
    #[case(CredentialError::AlreadyRegistered.into(), FailureKind::Conflict)]
    #[case(CredentialError::Incorrect.into(), FailureKind::InvalidCredentials)]
    #[case(FinancialError::IncomeFormat("ingreso_mensual").into(), FailureKind::Validation)]
    #[case(PersonalRecordError::InvalidAge.into(), FailureKind::Validation)]
    #[case(RepositoryError::StorageError("disk".into()).into(), FailureKind::Resource)]
    #[case(HashError("salt".into()).into(), FailureKind::Resource)]
    #[case(Fault::new("boom").into(), FailureKind::Fault)]
    #[case(FinancialError::Fault(Fault::new("boom")).into(), FailureKind::Fault)]
    fn test_kind(#[case] error: PipelineError, #[case] expected: FailureKind) {
        assert_eq!(error.kind(), expected);
    }

    #[rstest]
    fn test_message_is_stage_message() {
        let error = PipelineError::from(TokenError::Invalid);
        assert_eq!(error.to_string(), "Token inválido");
    }
}
