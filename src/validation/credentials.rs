//! Structural validation of login and registration payloads.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::payload::{FieldValue, PayloadError, decode_object, is_missing};
use crate::control::{Fault, Outcome};
use crate::domain::Credentials;

/// Credential and account failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// A field is absent or empty.
    #[error("Email y password son requeridos")]
    Required,
    /// A field is present but not a string.
    #[error("Email y password deben ser texto")]
    MustBeText,
    /// Registration for an email that already has an identity.
    #[error("El email ya está registrado")]
    AlreadyRegistered,
    /// Unknown email or wrong password; the two are indistinguishable.
    #[error("Email o contraseña incorrectos")]
    Incorrect,
    /// The body could not be decoded.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// A fault raised while validating.
    #[error("{0}")]
    Fault(Fault),
}

impl From<Fault> for CredentialError {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

/// Typed view of a credentials object before validation.
#[derive(Debug, Default, Deserialize)]
struct CredentialsPayload {
    #[serde(default)]
    email: Option<FieldValue>,
    #[serde(default)]
    password: Option<FieldValue>,
}

/// Validates a credentials object.
///
/// Checks run in order: presence first, then type. The values are passed
/// through unchanged.
///
/// # Errors
///
/// - [`CredentialError::Required`] if either field is absent, `null` or empty.
/// - [`CredentialError::MustBeText`] if either field is not a string.
pub fn validate_credentials(object: Map<String, Value>) -> Outcome<Credentials, CredentialError> {
    decode_object::<CredentialsPayload>(object)
        .map_err(CredentialError::from)
        .bind(|payload| {
            if is_missing(payload.email.as_ref()) || is_missing(payload.password.as_ref()) {
                return Outcome::failure(CredentialError::Required);
            }
            match (payload.email, payload.password) {
                (Some(FieldValue::Text(email)), Some(FieldValue::Text(password))) => {
                    Outcome::success(Credentials { email, password })
                }
                _ => Outcome::failure(CredentialError::MustBeText),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(object) => object,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[rstest]
    fn test_valid_credentials_pass_through() {
        let outcome = validate_credentials(object(json!({"email": "a@b.com", "password": "x"})));
        assert_eq!(
            outcome,
            Outcome::Ok(Credentials {
                email: "a@b.com".to_string(),
                password: "x".to_string(),
            })
        );
    }

    #[rstest]
    #[case(json!({"password": "x"}))]
    #[case(json!({"email": "a@b.com"}))]
    #[case(json!({"email": "", "password": "x"}))]
    #[case(json!({"email": null, "password": "x"}))]
    #[case(json!({}))]
    fn test_missing_fields_are_required(#[case] input: Value) {
        let outcome = validate_credentials(object(input));
        assert_eq!(outcome.unwrap_err_message(), "Email y password son requeridos");
    }

    #[rstest]
    #[case(json!({"email": 123, "password": "x"}))]
    #[case(json!({"email": "a@b.com", "password": ["x"]}))]
    #[case(json!({"email": true, "password": 5}))]
    fn test_non_text_fields_are_rejected(#[case] input: Value) {
        let outcome = validate_credentials(object(input));
        assert_eq!(outcome.unwrap_err_message(), "Email y password deben ser texto");
    }
}
