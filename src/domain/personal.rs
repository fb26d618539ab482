//! Personal information records.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::identity::{PrincipalId, Timestamp};

/// Identifier of a stored personal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a `RecordId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generates a new time-ordered identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated personal details as submitted by a client.
///
/// Known fields are typed; anything else the client sent is kept verbatim
/// in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    /// Full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_completo: Option<String>,
    /// Document type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_documento: Option<String>,
    /// Document number, as text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_documento: Option<String>,
    /// Birth date, as written by the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<String>,
    /// Age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edad: Option<u32>,
    /// Nationality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nacionalidad: Option<String>,
    /// Fields not listed above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A stored personal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    /// Identifier.
    pub id: RecordId,
    /// Owning principal.
    pub user_id: PrincipalId,
    /// Submitted details.
    #[serde(flatten)]
    pub details: PersonalDetails,
    /// Time of submission.
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_details_keep_unknown_fields() {
        let details: PersonalDetails = serde_json::from_value(json!({
            "nombreCompleto": "Ana Pérez",
            "edad": 31,
            "ciudad": "Bogotá"
        }))
        .unwrap();

        assert_eq!(details.nombre_completo.as_deref(), Some("Ana Pérez"));
        assert_eq!(details.edad, Some(31));
        assert_eq!(details.extra.get("ciudad"), Some(&json!("Bogotá")));

        let rendered = serde_json::to_value(&details).unwrap();
        assert_eq!(rendered["ciudad"], json!("Bogotá"));
        assert!(rendered.get("tipoDocumento").is_none());
    }
}
