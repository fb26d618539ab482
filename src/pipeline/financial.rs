//! Financial profile submission and retrieval.

use serde::Serialize;

use super::{PipelineContext, PipelineError, account::authenticate, stored};
use crate::control::{Maybe, Outcome};
use crate::domain::{
    FinancialProfile, FinancialSnapshot, IncomeSource, MonthlyIncome, Timestamp, UpsertOutcome,
};
use crate::validation::{
    FinancialError, RawRequest, parse_json, require_object, validate_financial,
    validate_legacy_financial,
};

/// Which payload schema a submission uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinancialSchema {
    /// `fuente_principal`, `ingreso_mensual`, ...
    Primary,
    /// The legacy desktop client's keys.
    Legacy,
}

/// Summary returned to the client after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialSummary {
    /// Normalized income source.
    pub fuente_principal: IncomeSource,
    /// Monthly income as stored.
    pub ingreso_mensual: MonthlyIncome,
    /// Sum of the five expenses.
    pub total_gastos: f64,
    /// Income minus expenses; `None` for a range.
    pub disponible: Option<f64>,
}

impl From<&FinancialSnapshot> for FinancialSummary {
    fn from(snapshot: &FinancialSnapshot) -> Self {
        Self {
            fuente_principal: snapshot.fuente_principal,
            ingreso_mensual: snapshot.ingreso_mensual,
            total_gastos: snapshot.total_gastos,
            disponible: snapshot.disponible,
        }
    }
}

/// Result of a financial submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialSubmission {
    /// Whether the profile was created or replaced, and its identifier.
    pub outcome: UpsertOutcome,
    /// Derived totals.
    pub summary: FinancialSummary,
}

/// `authenticate -> parse -> validate -> upsert -> summarize`.
///
/// Running it twice for the same principal leaves one stored profile; the
/// second run reports [`UpsertOutcome::Updated`].
///
/// # Errors
///
/// Authentication, structural and validation failures, and resource
/// failures from the store.
pub fn submit_financial(
    context: &PipelineContext,
    token: Option<&str>,
    request: &RawRequest,
    schema: FinancialSchema,
) -> Outcome<FinancialSubmission, PipelineError> {
    authenticate(context, token)
        .bind(|principal| {
            parse_json(request)
                .bind(require_object)
                .map_err(FinancialError::from)
                .bind(|object| match schema {
                    FinancialSchema::Primary => validate_financial(object),
                    FinancialSchema::Legacy => validate_legacy_financial(object),
                })
                .map_err(PipelineError::from)
                .map(|snapshot| (principal, snapshot))
        })
        .bind(|(principal, snapshot)| {
            tracing::debug!(user = %principal.id, ?schema, "financial payload validated");
            stored(
                context
                    .financial_profiles
                    .upsert(principal.id, snapshot, Timestamp::now()),
            )
            .map(|outcome| FinancialSubmission {
                outcome,
                summary: FinancialSummary::from(&snapshot),
            })
        })
        .map(|submission| {
            tracing::info!(outcome = ?submission.outcome, "financial profile stored");
            submission
        })
}

/// `authenticate -> lookup`.
///
/// # Errors
///
/// Authentication failures and resource failures from the store. A missing
/// profile is a success carrying `Maybe::None`.
pub fn fetch_financial(
    context: &PipelineContext,
    token: Option<&str>,
) -> Outcome<Maybe<FinancialProfile>, PipelineError> {
    authenticate(context, token)
        .bind(|principal| stored(context.financial_profiles.find_by_user(&principal.id)))
}
