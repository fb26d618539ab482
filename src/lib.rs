//! # fintake
//!
//! Composable validation pipelines for authenticated personal-finance data
//! collection.
//!
//! ## Overview
//!
//! Every request is handled by one chain of small fallible stages. Each
//! stage returns an [`Outcome`](control::Outcome); the first failure
//! short-circuits the rest of the chain and carries its message to the
//! caller, and a panic inside any stage is captured as a failure instead of
//! unwinding. The crate contains:
//!
//! - **Control**: `Outcome`, `Maybe` and fault capture
//! - **Domain**: identities, financial profiles, personal records
//! - **Validation**: payload parsing and the credential, financial and
//!   personal-record validators
//! - **Auth**: the token verifier and the hashing/signing collaborator traits
//! - **Repository**: storage collaborator traits
//! - **Pipeline**: the per-endpoint chains, driven by a `PipelineContext`
//!
//! Transport, concrete storage and concrete cryptography live in the
//! `fintake-api` crate.
//!
//! ## Example
//!
//! ```rust
//! use fintake::validation::{
//!     FinancialError, RawRequest, parse_json, require_object, validate_financial,
//! };
//!
//! let request = RawRequest::json(r#"{"fuente_principal":"empleo","ingreso_mensual":3000000}"#);
//! let snapshot = parse_json(&request)
//!     .bind(require_object)
//!     .map_err(FinancialError::from)
//!     .bind(validate_financial)
//!     .unwrap();
//!
//! assert_eq!(snapshot.fuente_principal.as_str(), "empleo");
//! assert_eq!(snapshot.total_gastos, 0.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod auth;
pub mod control;
pub mod domain;
pub mod pipeline;
pub mod repository;
pub mod validation;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use fintake::prelude::*;
///
/// let found: Maybe<i32> = Maybe::some(1);
/// assert_eq!(found.ok_or("missing".to_string()), Outcome::Ok(1));
/// ```
pub mod prelude {
    pub use crate::control::{Fault, Maybe, Outcome};
    pub use crate::pipeline::{FailureKind, PipelineContext, PipelineError};
    pub use crate::validation::RawRequest;
}
