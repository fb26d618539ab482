//! Outcome type - the success-or-failure value every pipeline stage returns.
//!
//! `Outcome<T, E>` is either `Ok(T)` or `Err(E)`. It differs from the standard
//! `Result` in one respect: [`Outcome::bind`] and [`Outcome::map`] run their
//! step inside a panic boundary, so a fault raised by a step becomes an
//! ordinary `Err` instead of unwinding through the rest of the pipeline.
//!
//! The default error type is `String`, which is enough for message-only
//! pipelines. Typed stage errors only need to implement `From<Fault>`.
//!
//! # Examples
//!
//! ```rust
//! use fintake::control::Outcome;
//!
//! let doubled: Outcome<i32> = Outcome::success(5).bind(|x| Outcome::success(x * 2));
//! assert_eq!(doubled, Outcome::Ok(10));
//!
//! // A failure short-circuits: the step is never invoked.
//! let failed: Outcome<i32> = Outcome::failure("error".to_string());
//! let still_failed = failed.bind(|x| Outcome::success(x * 2));
//! assert_eq!(still_failed, Outcome::Err("error".to_string()));
//!
//! // Faults inside a step are captured as failures.
//! let divisor = std::hint::black_box(0);
//! let faulted: Outcome<i32> = Outcome::success(5).map(|x| x / divisor);
//! assert!(faulted.unwrap_err_message().contains("divide by zero"));
//! ```

use std::fmt;

use super::fault::{self, Fault};

/// The result of a single pipeline stage.
///
/// Exactly one variant is populated: `Ok` never carries a failure and `Err`
/// never carries a value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<T, E = String> {
    /// The stage succeeded with a value.
    Ok(T),
    /// The stage failed.
    Err(E),
}

impl<T, E> Outcome<T, E> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Wraps a successful value.
    #[inline]
    pub const fn success(value: T) -> Self {
        Self::Ok(value)
    }

    /// Wraps a failure.
    #[inline]
    pub const fn failure(error: E) -> Self {
        Self::Err(error)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns `true` if this is an `Ok` value.
    #[inline]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns `true` if this is an `Err` value.
    #[inline]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Returns a reference to the success value, if any.
    #[inline]
    pub const fn as_ok(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    /// Returns a reference to the failure, if any.
    #[inline]
    pub const fn as_err(&self) -> Option<&E> {
        match self {
            Self::Ok(_) => None,
            Self::Err(error) => Some(error),
        }
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Sequences a failable step.
    ///
    /// If this is `Err`, the failure is returned unchanged and `step` is never
    /// invoked. If this is `Ok(value)`, returns `step(value)`; a panic inside
    /// `step` is captured and returned as `Err(E::from(fault))`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fintake::control::Outcome;
    ///
    /// let parsed: Outcome<i32> = Outcome::success("42").bind(|text| {
    ///     text.parse::<i32>()
    ///         .map_err(|error| error.to_string())
    ///         .into()
    /// });
    /// assert_eq!(parsed, Outcome::Ok(42));
    /// ```
    pub fn bind<U, F>(self, step: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
        E: From<Fault>,
    {
        match self {
            Self::Ok(value) => fault::capture(move || step(value))
                .unwrap_or_else(|fault| Outcome::Err(fault.into())),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Transforms the success value.
    ///
    /// Same short-circuit rule as [`bind`](Self::bind). A panic inside
    /// `transform` is captured and returned as `Err(E::from(fault))`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fintake::control::Outcome;
    ///
    /// let length: Outcome<usize> = Outcome::success("hello").map(str::len);
    /// assert_eq!(length, Outcome::Ok(5));
    /// ```
    pub fn map<U, F>(self, transform: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
        E: From<Fault>,
    {
        match self {
            Self::Ok(value) => match fault::capture(move || transform(value)) {
                Ok(mapped) => Outcome::Ok(mapped),
                Err(fault) => Outcome::Err(fault.into()),
            },
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Transforms the failure, leaving a success untouched.
    ///
    /// Used to lift a stage-specific error into the error type of the
    /// enclosing pipeline.
    #[inline]
    pub fn map_err<G, F>(self, function: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => Outcome::Err(function(error)),
        }
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// Returns the success value, or `fallback` on failure. Never panics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fintake::control::Outcome;
    ///
    /// let failed: Outcome<i32> = Outcome::failure("nope".to_string());
    /// assert_eq!(failed.unwrap_or(7), 7);
    /// ```
    #[inline]
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => fallback,
        }
    }

    /// Converts into a standard `Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(error) => Err(error),
        }
    }
}

impl<T, E: fmt::Display> Outcome<T, E> {
    /// Returns the success value.
    ///
    /// Only for trusted internal call sites; request boundaries must inspect
    /// the variant instead.
    ///
    /// # Panics
    ///
    /// Panics with the failure message if this is an `Err` value.
    #[inline]
    pub fn unwrap(self) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(error) => panic!("called `Outcome::unwrap()` on a failure: {error}"),
        }
    }

    /// Returns the failure message.
    ///
    /// # Panics
    ///
    /// Panics if this is an `Ok` value.
    #[inline]
    pub fn unwrap_err_message(self) -> String {
        match self {
            Self::Ok(_) => panic!("called `Outcome::unwrap_err_message()` on a success"),
            Self::Err(error) => error.to_string(),
        }
    }
}

// =============================================================================
// Debug Implementation
// =============================================================================

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Outcome<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(value) => formatter.debug_tuple("Ok").field(value).finish(),
            Self::Err(error) => formatter.debug_tuple("Err").field(error).finish(),
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    #[inline]
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Err(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    #[inline]
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_success_construction() {
        let outcome: Outcome<&str> = Outcome::success("test_value");
        assert!(outcome.is_ok());
        assert_eq!(outcome.as_ok(), Some(&"test_value"));
        assert_eq!(outcome.as_err(), None);
    }

    #[rstest]
    fn test_failure_construction() {
        let outcome: Outcome<i32> = Outcome::failure("test_error".to_string());
        assert!(outcome.is_err());
        assert_eq!(outcome.as_err().map(String::as_str), Some("test_error"));
        assert_eq!(outcome.as_ok(), None);
    }

    #[rstest]
    fn test_bind_success() {
        let outcome: Outcome<i32> = Outcome::success(5).bind(|x| Outcome::success(x * 2));
        assert_eq!(outcome, Outcome::Ok(10));
    }

    #[rstest]
    fn test_bind_failure_never_invokes_step() {
        let mut invoked = false;
        let outcome: Outcome<i32> = Outcome::failure("error".to_string()).bind(|x: i32| {
            invoked = true;
            Outcome::success(x * 2)
        });
        assert_eq!(outcome, Outcome::Err("error".to_string()));
        assert!(!invoked);
    }

    #[rstest]
    fn test_bind_captures_panic() {
        let outcome: Outcome<i32> =
            Outcome::success(1).bind(|_| -> Outcome<i32> { panic!("stage exploded") });
        assert_eq!(outcome, Outcome::Err("stage exploded".to_string()));
    }

    #[rstest]
    fn test_map_captures_division_by_zero() {
        let divisor = std::hint::black_box(0);
        let outcome: Outcome<i32> = Outcome::success(5).map(|x| x / divisor);
        assert!(outcome.unwrap_err_message().contains("divide by zero"));
    }

    #[rstest]
    fn test_map_err_lifts_error_type() {
        let outcome: Outcome<i32, usize> =
            Outcome::<i32, String>::failure("four".to_string()).map_err(|error| error.len());
        assert_eq!(outcome, Outcome::Err(4));
    }

    #[rstest]
    fn test_unwrap_or() {
        assert_eq!(Outcome::<i32>::success(3).unwrap_or(0), 3);
        assert_eq!(Outcome::<i32>::failure("x".to_string()).unwrap_or(0), 0);
    }

    #[rstest]
    #[should_panic(expected = "boom")]
    fn test_unwrap_panics_with_message() {
        let _ = Outcome::<i32>::failure("boom".to_string()).unwrap();
    }

    #[rstest]
    fn test_result_conversion() {
        let outcome: Outcome<i32> = Ok::<i32, String>(3).into();
        assert_eq!(outcome, Outcome::Ok(3));
        let result: Result<i32, String> = Outcome::<i32>::failure("e".to_string()).into();
        assert_eq!(result, Err("e".to_string()));
    }
}
