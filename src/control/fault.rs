//! Fault capture for pipeline steps.
//!
//! A [`Fault`] is the description of a panic raised inside a step passed to
//! [`Outcome::bind`](super::Outcome::bind) or [`Outcome::map`](super::Outcome::map).
//! The combinators catch the unwind and turn it into an ordinary failure, so a
//! single stage can never take the whole request down with it.
//!
//! # Examples
//!
//! ```rust
//! use fintake::control::fault;
//!
//! let captured = fault::capture::<i32, _>(|| panic!("boom"));
//! assert_eq!(captured.unwrap_err().description(), "boom");
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Description of a panic captured while running a pipeline step.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fault {
    description: String,
}

impl Fault {
    /// Creates a fault with the given description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// Builds a fault from a panic payload.
    ///
    /// `panic!` payloads are either `&'static str` or `String`; anything else
    /// is reported with a generic description.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let description = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => payload.downcast::<&'static str>().map_or_else(
                |_| "unknown fault".to_string(),
                |message| (*message).to_string(),
            ),
        };
        Self { description }
    }

    /// Returns the fault description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Fault").field(&self.description).finish()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.description)
    }
}

impl std::error::Error for Fault {}

impl From<Fault> for String {
    fn from(fault: Fault) -> Self {
        fault.description
    }
}

/// Runs `function`, converting a panic into a [`Fault`].
///
/// # Errors
///
/// Returns the captured [`Fault`] if `function` panics.
pub fn capture<T, F>(function: F) -> Result<T, Fault>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(function)).map_err(|payload| {
        let fault = Fault::from_panic(payload);
        tracing::warn!(fault = %fault, "pipeline step panicked");
        fault
    })
}
