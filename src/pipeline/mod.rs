//! Per-endpoint pipelines.
//!
//! Each public function here is one composed chain over
//! [`Outcome`](crate::control::Outcome): it takes the raw request (and token,
//! for authenticated endpoints), runs every stage in order, and returns
//! either the value the boundary renders or a [`PipelineError`] whose message
//! is shown verbatim. Choosing a transport status from
//! [`PipelineError::kind`] is left to the caller.
//!
//! | Pipeline | Chain |
//! |---|---|
//! | [`register`] | parse, validate, ensure absent, hash, insert |
//! | [`login`] | parse, validate, lookup, verify, sign |
//! | [`authenticate`] | decode, lookup |
//! | [`submit_financial`] | authenticate, parse, validate, upsert, summarize |
//! | [`fetch_financial`] | authenticate, lookup |
//! | [`submit_personal`] | authenticate, parse, validate, stamp, insert |
//! | [`list_personal`] | authenticate, list |
//! | [`list_all_personal`] | list, enrich |

mod account;
mod context;
mod error;
mod financial;
mod personal;

pub use account::{Registration, Session, authenticate, login, register};
pub use context::{DEFAULT_TOKEN_TTL_HOURS, PipelineContext};
pub use error::{FailureKind, PipelineError};
pub use financial::{
    FinancialSchema, FinancialSubmission, FinancialSummary, fetch_financial, submit_financial,
};
pub use personal::{
    DirectoryEntry, UNAVAILABLE_EMAIL, list_all_personal, list_personal, submit_personal,
};

use crate::control::Outcome;
use crate::repository::RepositoryError;

/// Lifts a repository call into a pipeline stage, logging failures.
fn stored<T>(result: Result<T, RepositoryError>) -> Outcome<T, PipelineError> {
    match result {
        Ok(value) => Outcome::success(value),
        Err(error) => {
            tracing::error!(%error, "repository call failed");
            Outcome::failure(error.into())
        }
    }
}
