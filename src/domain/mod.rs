//! Domain model shared by every pipeline.
//!
//! - [`identity`]: accounts, principals and credentials
//! - [`financial`]: the normalized financial profile
//! - [`personal`]: free-form personal information records

pub mod financial;
pub mod identity;
pub mod personal;

pub use financial::{
    Expenses, FinancialProfile, FinancialSnapshot, IncomeSource, MonthlyIncome, ProfileId,
    UpsertOutcome,
};
pub use identity::{Credentials, Identity, PasswordDigest, Principal, PrincipalId, Timestamp};
pub use personal::{PersonalDetails, PersonalRecord, RecordId};
