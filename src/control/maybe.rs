//! Maybe type - presence or absence of a looked-up value.
//!
//! `Maybe<T>` is returned by lookups (a principal by handle, a profile by
//! principal). Absence is never a failure reason by itself; a pipeline decides
//! what absence means by lifting the value into an [`Outcome`] with
//! [`Maybe::ok_or`].
//!
//! # Examples
//!
//! ```rust
//! use fintake::control::{Maybe, Outcome};
//!
//! let found = Maybe::some(5).bind(|x| Maybe::some(x * 2));
//! assert_eq!(found, Maybe::Some(10));
//!
//! let missing: Maybe<i32> = Maybe::none();
//! let lifted: Outcome<i32> = missing.ok_or("not found".to_string());
//! assert_eq!(lifted, Outcome::Err("not found".to_string()));
//! ```

use super::Outcome;

/// A value that may or may not be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Maybe<T> {
    /// A value is present.
    Some(T),
    /// No value.
    None,
}

impl<T> Maybe<T> {
    /// Wraps a present value.
    #[inline]
    pub const fn some(value: T) -> Self {
        Self::Some(value)
    }

    /// The absent value.
    #[inline]
    pub const fn none() -> Self {
        Self::None
    }

    /// Returns `true` if a value is present.
    #[inline]
    pub const fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    /// Returns `true` if no value is present.
    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns a reference to the value, if present.
    #[inline]
    pub const fn as_some(&self) -> Option<&T> {
        match self {
            Self::Some(value) => Some(value),
            Self::None => None,
        }
    }

    /// Chains another lookup on the present value.
    #[inline]
    pub fn bind<U, F>(self, function: F) -> Maybe<U>
    where
        F: FnOnce(T) -> Maybe<U>,
    {
        match self {
            Self::Some(value) => function(value),
            Self::None => Maybe::None,
        }
    }

    /// Transforms the present value.
    #[inline]
    pub fn map<U, F>(self, function: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => Maybe::Some(function(value)),
            Self::None => Maybe::None,
        }
    }

    /// Returns the value, or `fallback` if absent.
    #[inline]
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => fallback,
        }
    }

    /// Lifts into an [`Outcome`], using `error` when the value is absent.
    #[inline]
    pub fn ok_or<E>(self, error: E) -> Outcome<T, E> {
        match self {
            Self::Some(value) => Outcome::Ok(value),
            Self::None => Outcome::Err(error),
        }
    }

    /// Converts into a standard `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Some(value) => Some(value),
            Self::None => None,
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    #[inline]
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::None, Self::Some)
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    #[inline]
    fn from(maybe: Maybe<T>) -> Self {
        maybe.into_option()
    }
}
