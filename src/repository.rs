//! Storage collaborator contracts.
//!
//! The pipelines only see these traits. Implementations live in the
//! application crate and own their own synchronization; every method is a
//! blocking call from the pipeline's point of view.

use thiserror::Error;

use crate::control::Maybe;
use crate::domain::{
    FinancialProfile, FinancialSnapshot, Identity, PersonalRecord, PrincipalId, RecordId,
    Timestamp, UpsertOutcome,
};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// An identity with this email already exists.
    #[error("Email already stored: {0}")]
    DuplicateEmail(String),

    /// The backing store cannot be reached or written.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// =============================================================================
// Identity Repository
// =============================================================================

/// Repository for accounts.
pub trait IdentityRepository: Send + Sync {
    /// Finds an identity by its email handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_by_email(&self, email: &str) -> Result<Maybe<Identity>, RepositoryError>;

    /// Finds an identity by its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_by_id(&self, id: &PrincipalId) -> Result<Maybe<Identity>, RepositoryError>;

    /// Inserts a new identity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateEmail`] if the email is taken at
    /// the time of the write, even when an earlier lookup missed.
    fn insert(&self, identity: Identity) -> Result<(), RepositoryError>;
}

// =============================================================================
// Financial Profile Repository
// =============================================================================

/// Repository for financial profiles, at most one per principal.
pub trait FinancialProfileRepository: Send + Sync {
    /// Finds the profile owned by `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_by_user(&self, user: &PrincipalId) -> Result<Maybe<FinancialProfile>, RepositoryError>;

    /// Replaces the profile owned by `user`, or inserts one if none exists.
    ///
    /// The find-then-write must be atomic per principal: concurrent upserts
    /// for the same `user` leave exactly one profile. On replace, `created_at`
    /// and the identifier are preserved and `updated_at` is set to `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn upsert(
        &self,
        user: PrincipalId,
        snapshot: FinancialSnapshot,
        at: Timestamp,
    ) -> Result<UpsertOutcome, RepositoryError>;
}

// =============================================================================
// Personal Record Repository
// =============================================================================

/// Repository for personal information records.
pub trait PersonalRecordRepository: Send + Sync {
    /// Stores a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn insert(&self, record: PersonalRecord) -> Result<RecordId, RepositoryError>;

    /// Lists the records owned by `user`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_by_user(&self, user: &PrincipalId) -> Result<Vec<PersonalRecord>, RepositoryError>;

    /// Lists every record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_all(&self) -> Result<Vec<PersonalRecord>, RepositoryError>;
}
