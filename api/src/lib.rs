//! HTTP API for authenticated personal-finance data collection.
//!
//! Wraps the `fintake` pipelines in an axum router and supplies their
//! concrete collaborators: document stores, the HS256 token codec and the
//! Argon2 password hasher.

pub mod api;
pub mod infrastructure;
