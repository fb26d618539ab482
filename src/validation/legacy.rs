//! Legacy-client front-end for financial payloads.
//!
//! The desktop client posts camelCase-ish keys (`fuenteIngreso`, `ingreso`,
//! `arriendoHipo`, `services`, ...), its own source codes (`salario`,
//! `freelance`, ...) and currency-formatted text such as `"$1,000,000"`. This
//! adapter only renames fields and chooses [`NumberPolicy::Currency`]; the
//! checks themselves are the shared [`validate_fields`] chain.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::financial::{FinancialError, FinancialFields, NumberPolicy, Schema, validate_fields};
use super::payload::{FieldValue, decode_object};
use crate::control::Outcome;
use crate::domain::{FinancialSnapshot, IncomeSource};

/// The legacy-client schema.
pub const LEGACY_SCHEMA: Schema = Schema {
    source_field: "fuenteIngreso",
    income_field: "ingreso",
    expense_fields: [
        "arriendoHipo",
        "services",
        "alimentacion",
        "transporte",
        "otros",
    ],
    allowed_sources: &["salario", "freelance", "negocio", "pension", "inversion", "otros"],
    resolve_source: legacy_source,
    numbers: NumberPolicy::Currency,
};

/// Maps a legacy source code to the canonical source.
///
/// Canonical names are accepted as well.
#[must_use]
pub fn legacy_source(code: &str) -> Option<IncomeSource> {
    match code.trim().to_lowercase().as_str() {
        "salario" => Some(IncomeSource::Empleo),
        "freelance" => Some(IncomeSource::Independiente),
        "inversion" => Some(IncomeSource::Inversiones),
        other => IncomeSource::parse(other),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyFinancialPayload {
    #[serde(rename = "fuenteIngreso")]
    fuente_ingreso: Option<FieldValue>,
    #[serde(rename = "fuenteIngresos")]
    fuente_ingresos: Option<FieldValue>,
    ingreso: Option<FieldValue>,
    #[serde(rename = "arriendoHipo")]
    arriendo_hipo: Option<FieldValue>,
    services: Option<FieldValue>,
    alimentacion: Option<FieldValue>,
    transporte: Option<FieldValue>,
    otros: Option<FieldValue>,
}

impl From<LegacyFinancialPayload> for FinancialFields {
    fn from(payload: LegacyFinancialPayload) -> Self {
        Self {
            source: payload.fuente_ingreso.or(payload.fuente_ingresos),
            income: payload.ingreso,
            expenses: [
                payload.arriendo_hipo,
                payload.services,
                payload.alimentacion,
                payload.transporte,
                payload.otros,
            ],
        }
    }
}

/// Validates a legacy-client object into the normalized snapshot.
///
/// # Errors
///
/// Returns the first failing check as a [`FinancialError`], naming the
/// legacy field.
pub fn validate_legacy_financial(
    object: Map<String, Value>,
) -> Outcome<FinancialSnapshot, FinancialError> {
    decode_object::<LegacyFinancialPayload>(object)
        .map_err(FinancialError::from)
        .bind(|payload| validate_fields(&LEGACY_SCHEMA, payload.into()))
}
