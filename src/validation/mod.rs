//! Payload parsing and domain validators.
//!
//! Every validator is a pure function from a decoded payload to an
//! [`Outcome`](crate::control::Outcome) carrying a typed stage error.

pub mod credentials;
pub mod financial;
pub mod legacy;
pub mod payload;
pub mod personal;

pub use credentials::{CredentialError, validate_credentials};
pub use financial::{FinancialError, validate_financial};
pub use legacy::validate_legacy_financial;
pub use payload::{FieldValue, PayloadError, RawRequest, parse_json, require_object};
pub use personal::{PersonalRecordError, validate_personal};
