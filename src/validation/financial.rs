//! Financial profile validation and normalization.
//!
//! Validation is fail-fast: checks run in a fixed order and the first one
//! that fails ends the chain with its message.
//!
//! 1. Required fields (income source, monthly income) are present.
//! 2. The income source belongs to the allow-list.
//! 3. Monthly income is a number or a `"min-max"` range.
//! 4. Each expense, when present, is a finite number.
//! 5. The snapshot is built with defaults and derived totals.
//!
//! Both front-ends (the primary schema here and the legacy adapter in
//! [`super::legacy`]) feed the same [`validate_fields`] chain through a
//! [`Schema`]; they differ only in field names and number policy.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::payload::{FieldValue, PayloadError, decode_object, is_missing};
use crate::control::{Fault, Outcome};
use crate::domain::financial::parse_finite;
use crate::domain::{Expenses, FinancialSnapshot, IncomeSource, MonthlyIncome};

// =============================================================================
// Errors
// =============================================================================

/// Financial domain-validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FinancialError {
    /// One or more required fields are absent or empty.
    #[error("Campos requeridos faltantes: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// The income source is not in the allow-list.
    #[error("La fuente principal debe ser una de: {}", .0.join(", "))]
    InvalidSource(&'static [&'static str]),
    /// Income text that is neither an accepted amount nor a range.
    #[error("Formato inválido para {0}: use un número o un rango 'min-max'")]
    IncomeFormat(&'static str),
    /// Income that is neither a number nor text.
    #[error("El campo {0} debe ser un número o un rango en texto")]
    IncomeType(&'static str),
    /// An expense that does not parse as a finite number.
    #[error("Formato numérico inválido para {0}")]
    ExpenseFormat(&'static str),
    /// A negative amount where the schema forbids it.
    #[error("El campo {0} no puede ser negativo")]
    Negative(&'static str),
    /// Derived totals overflow a finite number.
    #[error("Los montos exceden el rango permitido")]
    TotalsOutOfRange,
    /// The body could not be decoded.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// A fault raised while validating.
    #[error("{0}")]
    Fault(Fault),
}

impl From<Fault> for FinancialError {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

// =============================================================================
// Schema
// =============================================================================

/// How numeric text is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberPolicy {
    /// Plain numeric text; negatives allowed; textual income must be a range.
    Strict,
    /// `$`, `,` and spaces stripped; negatives rejected; textual income may
    /// be a plain amount or a range.
    Currency,
}

impl NumberPolicy {
    fn clean(self, text: &str) -> String {
        match self {
            Self::Strict => text.trim().to_string(),
            Self::Currency => text
                .chars()
                .filter(|character| !matches!(character, '$' | ',' | ' '))
                .collect(),
        }
    }

    fn check_sign(self, field: &'static str, value: f64) -> Result<f64, FinancialError> {
        match self {
            Self::Currency if value < 0.0 => Err(FinancialError::Negative(field)),
            _ => Ok(value),
        }
    }
}

/// Field names and rules of one payload schema.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Name of the income-source field.
    pub source_field: &'static str,
    /// Name of the monthly-income field.
    pub income_field: &'static str,
    /// Names of the five expense fields, in [`Expenses`] order.
    pub expense_fields: [&'static str; Expenses::FIELD_COUNT],
    /// Source names listed in the rejection message.
    pub allowed_sources: &'static [&'static str],
    /// Maps a submitted source name to the canonical source.
    pub resolve_source: fn(&str) -> Option<IncomeSource>,
    /// Numeric text policy.
    pub numbers: NumberPolicy,
}

/// The primary schema.
pub const PRIMARY_SCHEMA: Schema = Schema {
    source_field: "fuente_principal",
    income_field: "ingreso_mensual",
    expense_fields: [
        "arriendo_hipoteca",
        "servicios",
        "alimentacion",
        "transporte",
        "otros_gastos_fijos",
    ],
    allowed_sources: &[
        "empleo",
        "independiente",
        "negocio",
        "pension",
        "inversiones",
        "otros",
    ],
    resolve_source: IncomeSource::parse,
    numbers: NumberPolicy::Strict,
};

/// Schema-independent view of a financial payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialFields {
    /// Submitted income source.
    pub source: Option<FieldValue>,
    /// Submitted monthly income.
    pub income: Option<FieldValue>,
    /// Submitted expenses, in [`Expenses`] order.
    pub expenses: [Option<FieldValue>; Expenses::FIELD_COUNT],
}

/// Typed view of a primary-schema payload.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FinancialPayload {
    fuente_principal: Option<FieldValue>,
    ingreso_mensual: Option<FieldValue>,
    arriendo_hipoteca: Option<FieldValue>,
    servicios: Option<FieldValue>,
    alimentacion: Option<FieldValue>,
    transporte: Option<FieldValue>,
    otros_gastos_fijos: Option<FieldValue>,
}

impl From<FinancialPayload> for FinancialFields {
    fn from(payload: FinancialPayload) -> Self {
        Self {
            source: payload.fuente_principal,
            income: payload.ingreso_mensual,
            expenses: [
                payload.arriendo_hipoteca,
                payload.servicios,
                payload.alimentacion,
                payload.transporte,
                payload.otros_gastos_fijos,
            ],
        }
    }
}

// =============================================================================
// Validation chain
// =============================================================================

/// Validates a primary-schema object.
///
/// # Errors
///
/// Returns the first failing check as a [`FinancialError`].
pub fn validate_financial(object: Map<String, Value>) -> Outcome<FinancialSnapshot, FinancialError> {
    decode_object::<FinancialPayload>(object)
        .map_err(FinancialError::from)
        .bind(|payload| validate_fields(&PRIMARY_SCHEMA, payload.into()))
}

/// Runs the ordered checks for `schema` over already-decoded fields.
///
/// # Errors
///
/// Returns the first failing check as a [`FinancialError`].
pub fn validate_fields(
    schema: &Schema,
    fields: FinancialFields,
) -> Outcome<FinancialSnapshot, FinancialError> {
    Outcome::success(fields)
        .bind(|fields| require_fields(schema, fields))
        .bind(|(source, income, expenses)| {
            resolve_source(schema, &source).map(|source| (source, income, expenses))
        })
        .bind(|(source, income, expenses)| {
            parse_income(schema, &income).map(|income| (source, income, expenses))
        })
        .bind(|(source, income, expenses)| {
            parse_expenses(schema, expenses).map(|expenses| (source, income, expenses))
        })
        .map(|(source, income, expenses)| FinancialSnapshot::new(source, income, expenses))
        .bind(require_finite_totals)
}

fn require_finite_totals(snapshot: FinancialSnapshot) -> Outcome<FinancialSnapshot, FinancialError> {
    let finite = snapshot.total_gastos.is_finite()
        && snapshot.disponible.is_none_or(f64::is_finite);
    if finite {
        Outcome::success(snapshot)
    } else {
        Outcome::failure(FinancialError::TotalsOutOfRange)
    }
}

type Required = (
    FieldValue,
    FieldValue,
    [Option<FieldValue>; Expenses::FIELD_COUNT],
);

fn require_fields(schema: &Schema, fields: FinancialFields) -> Outcome<Required, FinancialError> {
    let missing: Vec<&'static str> = [
        (schema.source_field, fields.source.as_ref()),
        (schema.income_field, fields.income.as_ref()),
    ]
    .into_iter()
    .filter(|(_, value)| is_missing(*value))
    .map(|(name, _)| name)
    .collect();

    match (fields.source, fields.income) {
        (Some(source), Some(income)) if missing.is_empty() => {
            Outcome::success((source, income, fields.expenses))
        }
        _ => Outcome::failure(FinancialError::MissingFields(missing)),
    }
}

fn resolve_source(schema: &Schema, value: &FieldValue) -> Outcome<IncomeSource, FinancialError> {
    value
        .as_text()
        .and_then(schema.resolve_source)
        .ok_or(FinancialError::InvalidSource(schema.allowed_sources))
        .into()
}

fn parse_income(schema: &Schema, value: &FieldValue) -> Outcome<MonthlyIncome, FinancialError> {
    let field = schema.income_field;
    let parsed = match value {
        FieldValue::Number(amount) => schema
            .numbers
            .check_sign(field, *amount)
            .map(MonthlyIncome::Amount),
        FieldValue::Text(text) => {
            let cleaned = schema.numbers.clean(text);
            let amount = match schema.numbers {
                NumberPolicy::Currency => parse_finite(&cleaned),
                NumberPolicy::Strict => None,
            };
            match amount {
                Some(amount) => schema
                    .numbers
                    .check_sign(field, amount)
                    .map(MonthlyIncome::Amount),
                None if cleaned.contains('-') => MonthlyIncome::parse_range(&cleaned)
                    .ok_or(FinancialError::IncomeFormat(field)),
                None => Err(FinancialError::IncomeFormat(field)),
            }
        }
        FieldValue::Other(_) => Err(FinancialError::IncomeType(field)),
    };
    parsed.into()
}

fn parse_expenses(
    schema: &Schema,
    values: [Option<FieldValue>; Expenses::FIELD_COUNT],
) -> Outcome<Expenses, FinancialError> {
    let mut parsed = [0.0; Expenses::FIELD_COUNT];
    for ((slot, value), field) in parsed.iter_mut().zip(values).zip(schema.expense_fields) {
        let amount = match value {
            None => continue,
            Some(FieldValue::Number(amount)) => Some(amount),
            Some(FieldValue::Text(text)) => parse_finite(&schema.numbers.clean(&text)),
            Some(FieldValue::Other(_)) => None,
        };
        let Some(amount) = amount else {
            return Outcome::failure(FinancialError::ExpenseFormat(field));
        };
        match schema.numbers.check_sign(field, amount) {
            Ok(amount) => *slot = amount,
            Err(error) => return Outcome::failure(error),
        }
    }
    Outcome::success(Expenses::from_values(parsed))
}
