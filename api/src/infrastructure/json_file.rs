//! JSON snapshot files for the document stores.
//!
//! Each logical record set is written as one JSON array. Writes go to a
//! sibling temporary file first and are renamed into place, so a crash
//! mid-write leaves the previous snapshot intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use fintake::repository::RepositoryError;

/// Snapshot of registered identities.
pub const USERS_FILE: &str = "users.json";
/// Snapshot of personal information records.
pub const PERSONAL_INFO_FILE: &str = "personal_info.json";
/// Snapshot of financial profiles.
pub const FINANCIAL_INFO_FILE: &str = "financial_info.json";

/// One JSON array on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Points at `path`; nothing is read or created yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Points at `file_name` inside `directory`.
    #[must_use]
    pub fn in_directory(directory: &Path, file_name: &str) -> Self {
        Self::new(directory.join(file_name))
    }

    /// Returns the snapshot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every document. A missing file is an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::StorageError`] if the file cannot be read
    /// and [`RepositoryError::SerializationError`] if it is not a JSON array
    /// of `T`.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Vec<T>, RepositoryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(self.storage_error(&error)),
        };

        serde_json::from_slice(&bytes).map_err(|error| {
            RepositoryError::SerializationError(format!("{}: {error}", self.path.display()))
        })
    }

    /// Replaces the snapshot with `documents`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::SerializationError`] if a document cannot be
    /// encoded and [`RepositoryError::StorageError`] if the file cannot be
    /// written.
    pub fn save<'a, T, I>(&self, documents: I) -> Result<(), RepositoryError>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let documents: Vec<&T> = documents.into_iter().collect();
        let bytes = serde_json::to_vec_pretty(&documents)
            .map_err(|error| RepositoryError::SerializationError(error.to_string()))?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, bytes).map_err(|error| self.storage_error(&error))?;
        fs::rename(&staging, &self.path).map_err(|error| self.storage_error(&error))?;

        tracing::debug!(path = %self.path.display(), documents = documents.len(), "snapshot written");
        Ok(())
    }

    fn storage_error(&self, error: &io::Error) -> RepositoryError {
        RepositoryError::StorageError(format!("{}: {error}", self.path.display()))
    }
}
