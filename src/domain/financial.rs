//! Financial profile domain model.
//!
//! A [`FinancialSnapshot`] is the normalized output of the financial
//! validators; a [`FinancialProfile`] is that snapshot bound to a principal
//! and stamped with timestamps. At most one profile exists per principal.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::{PrincipalId, Timestamp};

// =============================================================================
// Income Source
// =============================================================================

/// Enumerated main source of income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeSource {
    /// Salaried employment.
    Empleo,
    /// Self-employment or freelancing.
    Independiente,
    /// Own business.
    Negocio,
    /// Pension.
    Pension,
    /// Investment returns.
    Inversiones,
    /// Anything else.
    Otros,
}

impl IncomeSource {
    /// Every accepted source, in the order used by error messages.
    pub const ALL: [Self; 6] = [
        Self::Empleo,
        Self::Independiente,
        Self::Negocio,
        Self::Pension,
        Self::Inversiones,
        Self::Otros,
    ];

    /// Returns the canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empleo => "empleo",
            Self::Independiente => "independiente",
            Self::Negocio => "negocio",
            Self::Pension => "pension",
            Self::Inversiones => "inversiones",
            Self::Otros => "otros",
        }
    }

    /// Looks up a source by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|source| source.as_str() == normalized)
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// =============================================================================
// Monthly Income
// =============================================================================

/// Monthly income: a plain amount or a `"min-max"` range.
///
/// The range bounds are not ordered by this layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "IncomeRepr", try_from = "IncomeRepr")]
pub enum MonthlyIncome {
    /// A finite amount.
    Amount(f64),
    /// Two finite bounds.
    Range {
        /// Lower bound as written.
        min: f64,
        /// Upper bound as written.
        max: f64,
    },
}

impl MonthlyIncome {
    /// Returns the amount when this is not a range.
    #[must_use]
    pub const fn amount(&self) -> Option<f64> {
        match self {
            Self::Amount(value) => Some(*value),
            Self::Range { .. } => None,
        }
    }

    /// Parses the `"min-max"` textual form.
    ///
    /// Returns `None` unless the text splits on `-` into exactly two finite
    /// numbers.
    #[must_use]
    pub fn parse_range(text: &str) -> Option<Self> {
        let mut parts = text.split('-');
        let (Some(min), Some(max), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };
        let min = parse_finite(min)?;
        let max = parse_finite(max)?;
        Some(Self::Range { min, max })
    }
}

impl fmt::Display for MonthlyIncome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(value) => write!(formatter, "{value}"),
            Self::Range { min, max } => write!(formatter, "{min}-{max}"),
        }
    }
}

/// Wire representation: a JSON number or the range text.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum IncomeRepr {
    Amount(f64),
    Range(String),
}

impl From<MonthlyIncome> for IncomeRepr {
    fn from(income: MonthlyIncome) -> Self {
        match income {
            MonthlyIncome::Amount(value) => Self::Amount(value),
            range @ MonthlyIncome::Range { .. } => Self::Range(range.to_string()),
        }
    }
}

impl TryFrom<IncomeRepr> for MonthlyIncome {
    type Error = String;

    fn try_from(repr: IncomeRepr) -> Result<Self, Self::Error> {
        match repr {
            IncomeRepr::Amount(value) if value.is_finite() => Ok(Self::Amount(value)),
            IncomeRepr::Amount(value) => Err(format!("non-finite income {value}")),
            IncomeRepr::Range(text) => {
                Self::parse_range(&text).ok_or_else(|| format!("invalid income range {text:?}"))
            }
        }
    }
}

/// Parses trimmed text as a finite `f64`.
#[must_use]
pub fn parse_finite(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

// =============================================================================
// Expenses
// =============================================================================

/// Fixed-shape monthly expenses. Absent inputs default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Expenses {
    /// Rent or mortgage.
    pub arriendo_hipoteca: f64,
    /// Utilities.
    pub servicios: f64,
    /// Food.
    pub alimentacion: f64,
    /// Transport.
    pub transporte: f64,
    /// Other fixed expenses.
    pub otros_gastos_fijos: f64,
}

impl Expenses {
    /// Number of expense fields.
    pub const FIELD_COUNT: usize = 5;

    /// Builds expenses from values in field order.
    #[must_use]
    pub const fn from_values(values: [f64; Self::FIELD_COUNT]) -> Self {
        let [arriendo_hipoteca, servicios, alimentacion, transporte, otros_gastos_fijos] = values;
        Self {
            arriendo_hipoteca,
            servicios,
            alimentacion,
            transporte,
            otros_gastos_fijos,
        }
    }

    /// Returns the values in field order.
    #[must_use]
    pub const fn values(&self) -> [f64; Self::FIELD_COUNT] {
        [
            self.arriendo_hipoteca,
            self.servicios,
            self.alimentacion,
            self.transporte,
            self.otros_gastos_fijos,
        ]
    }

    /// Sum of the five expense fields.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values().iter().sum()
    }
}

// =============================================================================
// Snapshot and Profile
// =============================================================================

/// Normalized financial payload with derived totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Main income source.
    pub fuente_principal: IncomeSource,
    /// Monthly income.
    pub ingreso_mensual: MonthlyIncome,
    /// Expenses with defaults applied.
    pub gastos: Expenses,
    /// Sum of `gastos`.
    pub total_gastos: f64,
    /// Income minus expenses; `None` when income is a range.
    pub disponible: Option<f64>,
}

impl FinancialSnapshot {
    /// Builds a snapshot, computing the derived totals.
    #[must_use]
    pub fn new(source: IncomeSource, income: MonthlyIncome, expenses: Expenses) -> Self {
        let total_gastos = expenses.total();
        Self {
            fuente_principal: source,
            ingreso_mensual: income,
            gastos: expenses,
            total_gastos,
            disponible: income.amount().map(|amount| amount - total_gastos),
        }
    }
}

/// Identifier of a stored financial profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Creates a `ProfileId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generates a new time-ordered identifier.
    ///
    /// **Note**: impure (time + random).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A stored financial profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    /// Identifier.
    pub id: ProfileId,
    /// Owning principal (reference, not owned).
    pub user_id: PrincipalId,
    /// Normalized payload.
    #[serde(flatten)]
    pub snapshot: FinancialSnapshot,
    /// First write.
    pub created_at: Timestamp,
    /// Latest write.
    pub updated_at: Timestamp,
}

/// Result of an upsert-by-principal write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No profile existed; one was inserted.
    Created(ProfileId),
    /// The existing profile was replaced.
    Updated(ProfileId),
}

impl UpsertOutcome {
    /// Identifier of the stored profile.
    #[must_use]
    pub const fn id(&self) -> ProfileId {
        match self {
            Self::Created(id) | Self::Updated(id) => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("empleo", Some(IncomeSource::Empleo))]
    #[case("EMPLEO", Some(IncomeSource::Empleo))]
    #[case(" Pension ", Some(IncomeSource::Pension))]
    #[case("invalido", None)]
    fn test_income_source_parse(#[case] input: &str, #[case] expected: Option<IncomeSource>) {
        assert_eq!(IncomeSource::parse(input), expected);
    }

    #[rstest]
    #[case("1000-2000", Some(MonthlyIncome::Range { min: 1000.0, max: 2000.0 }))]
    #[case("2000-1000", Some(MonthlyIncome::Range { min: 2000.0, max: 1000.0 }))]
    #[case("1000-2000-3000", None)]
    #[case("abc-2000", None)]
    #[case("1000", None)]
    fn test_parse_range(#[case] input: &str, #[case] expected: Option<MonthlyIncome>) {
        assert_eq!(MonthlyIncome::parse_range(input), expected);
    }

    #[rstest]
    fn test_snapshot_derives_totals() {
        let expenses = Expenses::from_values([800_000.0, 300_000.0, 500_000.0, 200_000.0, 100_000.0]);
        let snapshot = FinancialSnapshot::new(
            IncomeSource::Empleo,
            MonthlyIncome::Amount(3_000_000.0),
            expenses,
        );

        assert!((snapshot.total_gastos - 1_900_000.0).abs() < f64::EPSILON);
        assert_eq!(snapshot.disponible, Some(1_100_000.0));
    }

    #[rstest]
    fn test_snapshot_with_range_has_no_available_amount() {
        let snapshot = FinancialSnapshot::new(
            IncomeSource::Negocio,
            MonthlyIncome::Range { min: 1.0, max: 2.0 },
            Expenses::default(),
        );
        assert_eq!(snapshot.disponible, None);
    }

    #[rstest]
    fn test_income_wire_format() {
        let amount = serde_json::to_value(MonthlyIncome::Amount(3000.0)).unwrap();
        assert_eq!(amount, serde_json::json!(3000.0));

        let range = serde_json::to_value(MonthlyIncome::Range { min: 1000.0, max: 2000.0 }).unwrap();
        assert_eq!(range, serde_json::json!("1000-2000"));

        let parsed: MonthlyIncome = serde_json::from_value(serde_json::json!("1000-2000")).unwrap();
        assert_eq!(parsed, MonthlyIncome::Range { min: 1000.0, max: 2000.0 });
    }
}
