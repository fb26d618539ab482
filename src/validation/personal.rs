//! Validation of personal information payloads.

use serde_json::{Map, Value};

use super::payload::{PayloadError, require_object};
use crate::control::{Fault, Outcome};
use crate::domain::PersonalDetails;

/// Keys the pipeline stamps itself; client values for them are dropped.
const RESERVED_KEYS: [&str; 4] = ["id", "user_id", "timestamp", "email_usuario"];

/// Personal-record validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonalRecordError {
    /// A known text field carries another type.
    #[error("El campo {0} debe ser texto")]
    MustBeText(&'static str),
    /// `edad` is not a non-negative integer.
    #[error("El campo edad debe ser un número entero no negativo")]
    InvalidAge,
    /// The body could not be decoded.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// A fault raised while validating.
    #[error("{0}")]
    Fault(Fault),
}

impl From<Fault> for PersonalRecordError {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

/// Validates a decoded personal-information document.
///
/// # Errors
///
/// - [`PayloadError::NotAnObject`] for non-object documents.
/// - [`PayloadError::Empty`] for an empty object.
/// - [`PersonalRecordError::MustBeText`] / [`PersonalRecordError::InvalidAge`]
///   for mistyped known fields.
pub fn validate_personal(value: Value) -> Outcome<PersonalDetails, PersonalRecordError> {
    require_object(value)
        .bind(|object| {
            if object.is_empty() {
                Outcome::failure(PayloadError::Empty)
            } else {
                Outcome::success(object)
            }
        })
        .map_err(PersonalRecordError::from)
        .bind(|object| details_from_object(object).into())
}

fn details_from_object(
    mut object: Map<String, Value>,
) -> Result<PersonalDetails, PersonalRecordError> {
    for key in RESERVED_KEYS {
        object.remove(key);
    }
    Ok(PersonalDetails {
        nombre_completo: take_text(&mut object, "nombreCompleto")?,
        tipo_documento: take_text(&mut object, "tipoDocumento")?,
        numero_documento: take_text(&mut object, "numeroDocumento")?,
        fecha_nacimiento: take_text(&mut object, "fechaNacimiento")?,
        edad: take_age(&mut object)?,
        nacionalidad: take_text(&mut object, "nacionalidad")?,
        extra: object,
    })
}

fn take_text(
    object: &mut Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, PersonalRecordError> {
    match object.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(PersonalRecordError::MustBeText(key)),
    }
}

fn take_age(object: &mut Map<String, Value>) -> Result<Option<u32>, PersonalRecordError> {
    match object.remove("edad") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|age| u32::try_from(age).ok())
            .map(Some)
            .ok_or(PersonalRecordError::InvalidAge),
        Some(_) => Err(PersonalRecordError::InvalidAge),
    }
}
