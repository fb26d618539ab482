//! Personal information records.

use super::{PipelineContext, PipelineError, account::authenticate, stored};
use crate::control::{Maybe, Outcome};
use crate::domain::{PersonalRecord, RecordId, Timestamp};
use crate::validation::{PersonalRecordError, RawRequest, parse_json, validate_personal};

/// Shown in place of an owner email that cannot be resolved.
pub const UNAVAILABLE_EMAIL: &str = "No disponible";

/// A record together with its owner's email, for the public listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryEntry {
    /// The stored record.
    pub record: PersonalRecord,
    /// Owner email, or [`UNAVAILABLE_EMAIL`].
    pub owner_email: String,
}

/// `authenticate -> parse -> validate -> stamp -> insert`.
///
/// # Errors
///
/// Authentication, structural and validation failures, and resource
/// failures from the store.
pub fn submit_personal(
    context: &PipelineContext,
    token: Option<&str>,
    request: &RawRequest,
) -> Outcome<RecordId, PipelineError> {
    authenticate(context, token)
        .bind(|principal| {
            parse_json(request)
                .map_err(PersonalRecordError::from)
                .bind(validate_personal)
                .map_err(PipelineError::from)
                .map(|details| PersonalRecord {
                    id: RecordId::generate(),
                    user_id: principal.id,
                    details,
                    timestamp: Timestamp::now(),
                })
        })
        .bind(|record| stored(context.personal_records.insert(record)))
        .map(|id| {
            tracing::info!(%id, "personal record stored");
            id
        })
}

/// `authenticate -> list by owner`.
///
/// # Errors
///
/// Authentication failures and resource failures from the store.
pub fn list_personal(
    context: &PipelineContext,
    token: Option<&str>,
) -> Outcome<Vec<PersonalRecord>, PipelineError> {
    authenticate(context, token)
        .bind(|principal| stored(context.personal_records.find_by_user(&principal.id)))
}

/// Lists every record with its owner's email. Public.
///
/// An owner lookup that misses or fails does not fail the listing.
///
/// # Errors
///
/// Resource failures while listing the records themselves.
pub fn list_all_personal(context: &PipelineContext) -> Outcome<Vec<DirectoryEntry>, PipelineError> {
    stored(context.personal_records.list_all()).map(|records| {
        records
            .into_iter()
            .map(|record| {
                let owner_email = match context.identities.find_by_id(&record.user_id) {
                    Ok(Maybe::Some(identity)) => identity.email,
                    Ok(Maybe::None) => UNAVAILABLE_EMAIL.to_string(),
                    Err(error) => {
                        tracing::warn!(%error, record = %record.id, "owner lookup failed");
                        UNAVAILABLE_EMAIL.to_string()
                    }
                };
                DirectoryEntry {
                    record,
                    owner_email,
                }
            })
            .collect()
    })
}
