//! Control structures for composing pipeline stages.
//!
//! - [`Outcome`]: success or failure of a stage, with fault-capturing
//!   `bind`/`map`
//! - [`Maybe`]: presence or absence of a looked-up value
//! - [`Fault`]: a panic captured inside a stage
//!
//! # Examples
//!
//! ```rust
//! use fintake::control::{Maybe, Outcome};
//!
//! fn lookup(handle: &str) -> Maybe<u32> {
//!     if handle == "a@b.com" { Maybe::some(7) } else { Maybe::none() }
//! }
//!
//! let resolved: Outcome<u32> = Outcome::success("a@b.com")
//!     .bind(|handle| lookup(handle).ok_or("Token inválido".to_string()));
//! assert_eq!(resolved, Outcome::Ok(7));
//! ```

pub mod fault;
mod maybe;
mod outcome;

pub use fault::Fault;
pub use maybe::Maybe;
pub use outcome::Outcome;
