//! Response bodies.
//!
//! Field names and messages follow what the existing Spanish-language client
//! reads.

use serde::Serialize;

use fintake::domain::{
    FinancialProfile, PersonalDetails, PersonalRecord, PrincipalId, Timestamp, UpsertOutcome,
};
use fintake::pipeline::{
    DirectoryEntry, FinancialSubmission, FinancialSummary, Registration, Session,
};

/// `201` body of `POST /registro`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    /// Confirmation message.
    pub mensaje: &'static str,
    /// Identifier of the new account.
    pub id: String,
}

impl From<Registration> for RegisterResponse {
    fn from(registration: Registration) -> Self {
        Self {
            mensaje: "Usuario registrado exitosamente",
            id: registration.id.to_string(),
        }
    }
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Confirmation message.
    pub mensaje: &'static str,
    /// Bearer token for the `x-access-token` header.
    pub token: String,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        Self {
            mensaje: "Login exitoso",
            token: session.token,
        }
    }
}

/// Body of `POST /info_financiera` and its legacy variant.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialSubmissionResponse {
    /// Whether the profile was created or updated.
    pub mensaje: &'static str,
    /// Profile identifier.
    pub id: String,
    /// Derived totals.
    pub resumen: FinancialSummary,
}

impl From<FinancialSubmission> for FinancialSubmissionResponse {
    fn from(submission: FinancialSubmission) -> Self {
        let mensaje = match submission.outcome {
            UpsertOutcome::Created(_) => "Información financiera creada exitosamente",
            UpsertOutcome::Updated(_) => "Información financiera actualizada exitosamente",
        };
        Self {
            mensaje,
            id: submission.outcome.id().to_string(),
            resumen: submission.summary,
        }
    }
}

/// Body of `GET /obtener_info_financiera`.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialInfoResponse {
    /// Found / not found message.
    pub mensaje: &'static str,
    /// The stored profile, `null` when absent.
    pub info_financiera: Option<FinancialProfile>,
}

impl FinancialInfoResponse {
    /// A profile was found.
    #[must_use]
    pub const fn found(profile: FinancialProfile) -> Self {
        Self {
            mensaje: "Información financiera obtenida exitosamente",
            info_financiera: Some(profile),
        }
    }

    /// No profile exists for the caller.
    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            mensaje: "No se encontró información financiera",
            info_financiera: None,
        }
    }
}

/// Body of `POST /info_personal`.
#[derive(Debug, Clone, Serialize)]
pub struct PersonalSubmissionResponse {
    /// Confirmation message.
    pub mensaje: &'static str,
    /// Record identifier.
    pub id: String,
}

impl PersonalSubmissionResponse {
    /// Confirms the record stored under `id`.
    #[must_use]
    pub fn stored(id: impl ToString) -> Self {
        Self {
            mensaje: "Datos recibidos y almacenados correctamente",
            id: id.to_string(),
        }
    }
}

/// One of the caller's own records, without its identifier.
#[derive(Debug, Clone, Serialize)]
pub struct OwnRecordResponse {
    /// Owning principal.
    pub user_id: PrincipalId,
    /// Submitted details.
    #[serde(flatten)]
    pub details: PersonalDetails,
    /// Time of submission.
    pub timestamp: Timestamp,
}

impl From<PersonalRecord> for OwnRecordResponse {
    fn from(record: PersonalRecord) -> Self {
        Self {
            user_id: record.user_id,
            details: record.details,
            timestamp: record.timestamp,
        }
    }
}

/// One entry of the public listing.
#[derive(Debug, Clone, Serialize)]
pub struct PersonEntry {
    /// The stored record.
    #[serde(flatten)]
    pub record: PersonalRecord,
    /// Owner email, or "No disponible".
    pub email_usuario: String,
}

impl From<DirectoryEntry> for PersonEntry {
    fn from(entry: DirectoryEntry) -> Self {
        Self {
            record: entry.record,
            email_usuario: entry.owner_email,
        }
    }
}

/// Body of `GET /todas_personas`.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryResponse {
    /// Number of entries.
    pub total_registros: usize,
    /// Every stored record.
    pub personas: Vec<PersonEntry>,
}

impl From<Vec<DirectoryEntry>> for DirectoryResponse {
    fn from(entries: Vec<DirectoryEntry>) -> Self {
        let personas: Vec<PersonEntry> = entries.into_iter().map(PersonEntry::from).collect();
        Self {
            total_registros: personas.len(),
            personas,
        }
    }
}
