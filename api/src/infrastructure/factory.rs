//! Repository factory for runtime backend selection.
//!
//! Chooses between purely in-memory stores and stores that snapshot every
//! write to JSON files, then assembles the [`PipelineContext`] the handlers
//! share.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `json_file`
//! - `DATA_DIR`: snapshot directory when `STORAGE_MODE=json_file` (default: `data`)
//!
//! # Example
//!
//! ```ignore
//! let factory = RepositoryFactory::from_env()?;
//! let repositories = factory.create()?;
//! let context = repositories.into_context(AuthConfig::from_env()?);
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use fintake::pipeline::PipelineContext;
use fintake::repository::{
    FinancialProfileRepository, IdentityRepository, PersonalRecordRepository, RepositoryError,
};

use super::config::AuthConfig;
use super::in_memory::{
    InMemoryFinancialProfileRepository, InMemoryIdentityRepository,
    InMemoryPersonalRecordRepository,
};
use super::json_file::{FINANCIAL_INFO_FILE, PERSONAL_INFO_FILE, SnapshotFile, USERS_FILE};
use super::jwt::Hs256Codec;
use super::password::Argon2Hasher;

/// Default snapshot directory.
pub const DEFAULT_DATA_DIR: &str = "data";

// =============================================================================
// Configuration Types
// =============================================================================

/// Where the document stores keep their records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Records live only for the lifetime of the process.
    #[default]
    InMemory,
    /// Records are snapshotted to JSON files after every write.
    JsonFile,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    /// Parses a storage mode from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "json_file" | "jsonfile" | "json" | "file" => Ok(Self::JsonFile),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Configuration for the repository factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Storage mode.
    pub storage_mode: StorageMode,
    /// Snapshot directory, used when `storage_mode` is `JsonFile`.
    pub data_dir: PathBuf,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl RepositoryConfig {
    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `STORAGE_MODE` is not recognized or
    /// `DATA_DIR` is blank.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a configuration from `lookup`, which plays the role of the
    /// environment.
    ///
    /// # Errors
    ///
    /// See [`RepositoryConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_mode = match lookup("STORAGE_MODE") {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => StorageMode::default(),
        };
        let data_dir = lookup("DATA_DIR").map_or_else(
            || PathBuf::from(DEFAULT_DATA_DIR),
            |value| PathBuf::from(value.trim()),
        );

        let config = Self {
            storage_mode,
            data_dir,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::EmptyDataDir` if file storage is selected
    /// without a directory.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.storage_mode == StorageMode::JsonFile && self.data_dir.as_os_str().is_empty() {
            return Err(ConfigurationError::EmptyDataDir);
        }
        Ok(())
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'in_memory' or 'json_file'")]
    InvalidStorageMode(String),

    /// `DATA_DIR` is blank while `STORAGE_MODE=json_file`.
    #[error("DATA_DIR must not be empty when STORAGE_MODE=json_file")]
    EmptyDataDir,

    /// `TOKEN_TTL_HOURS` is not a whole number of hours within the accepted range.
    #[error("Invalid TOKEN_TTL_HOURS: '{0}'. Expected between 1 and 8784 hours")]
    InvalidTokenTtl(String),

    /// `PORT` is not a valid port number.
    #[error("Invalid PORT: '{0}'")]
    InvalidPort(String),

    /// `HOST` and `PORT` do not form a socket address.
    #[error("Invalid server address: '{0}'")]
    InvalidAddress(String),
}

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The snapshot directory cannot be created.
    #[error("Data directory error: {0}")]
    DataDirectory(String),

    /// A snapshot exists but cannot be loaded.
    #[error("Snapshot load error: {0}")]
    Snapshot(#[from] RepositoryError),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Collection of initialized repositories.
#[derive(Clone)]
pub struct Repositories {
    /// Account store.
    pub identities: Arc<dyn IdentityRepository>,
    /// Financial profile store.
    pub financial_profiles: Arc<dyn FinancialProfileRepository>,
    /// Personal record store.
    pub personal_records: Arc<dyn PersonalRecordRepository>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Repositories")
            .field("identities", &"Arc<dyn IdentityRepository>")
            .field("financial_profiles", &"Arc<dyn FinancialProfileRepository>")
            .field("personal_records", &"Arc<dyn PersonalRecordRepository>")
            .finish()
    }
}

impl Repositories {
    /// Fresh in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            identities: Arc::new(InMemoryIdentityRepository::new()),
            financial_profiles: Arc::new(InMemoryFinancialProfileRepository::new()),
            personal_records: Arc::new(InMemoryPersonalRecordRepository::new()),
        }
    }

    /// Wires the stores together with the Argon2 hasher, the HS256 codec and
    /// the configured key and token lifetime.
    #[must_use]
    pub fn into_context(self, auth: AuthConfig) -> PipelineContext {
        PipelineContext::new(
            self.identities,
            self.financial_profiles,
            self.personal_records,
            Arc::new(Argon2Hasher::new()),
            Arc::new(Hs256Codec::new()),
            auth.signing_key,
        )
        .with_token_ttl(auth.token_ttl)
    }
}

/// Factory for creating repository instances based on configuration.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    /// Creates a new repository factory with the given configuration.
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Creates a new repository factory from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::Configuration` if environment configuration is invalid.
    pub fn from_env() -> Result<Self, FactoryError> {
        let config = RepositoryConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Returns the configuration used by this factory.
    #[must_use]
    pub const fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Creates all repositories based on the configuration.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the snapshot directory cannot be created or
    /// an existing snapshot cannot be loaded.
    pub fn create(&self) -> Result<Repositories, FactoryError> {
        match self.config.storage_mode {
            StorageMode::InMemory => Ok(Repositories::in_memory()),
            StorageMode::JsonFile => self.create_json_file_repositories(),
        }
    }

    fn create_json_file_repositories(&self) -> Result<Repositories, FactoryError> {
        let directory = &self.config.data_dir;
        fs::create_dir_all(directory).map_err(|error| {
            FactoryError::DataDirectory(format!("{}: {error}", directory.display()))
        })?;

        let identities = InMemoryIdentityRepository::with_snapshot(SnapshotFile::in_directory(
            directory, USERS_FILE,
        ))?;
        let financial_profiles = InMemoryFinancialProfileRepository::with_snapshot(
            SnapshotFile::in_directory(directory, FINANCIAL_INFO_FILE),
        )?;
        let personal_records = InMemoryPersonalRecordRepository::with_snapshot(
            SnapshotFile::in_directory(directory, PERSONAL_INFO_FILE),
        )?;

        tracing::info!(
            data_dir = %directory.display(),
            identities = identities.len(),
            financial_profiles = financial_profiles.len(),
            personal_records = personal_records.len(),
            "Snapshots loaded"
        );

        Ok(Repositories {
            identities: Arc::new(identities),
            financial_profiles: Arc::new(financial_profiles),
            personal_records: Arc::new(personal_records),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use rstest::rstest;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[rstest]
    #[case("in_memory", StorageMode::InMemory)]
    #[case("MEMORY", StorageMode::InMemory)]
    #[case("json_file", StorageMode::JsonFile)]
    #[case(" json ", StorageMode::JsonFile)]
    fn test_storage_mode_parses(#[case] input: &str, #[case] expected: StorageMode) {
        assert_eq!(input.parse::<StorageMode>().unwrap(), expected);
    }

    #[rstest]
    fn test_unknown_storage_mode_is_rejected() {
        assert_eq!(
            "mongodb".parse::<StorageMode>(),
            Err(ConfigurationError::InvalidStorageMode("mongodb".to_string()))
        );
    }

    #[rstest]
    fn test_defaults_without_environment() {
        let config = RepositoryConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, RepositoryConfig::default());
    }

    #[rstest]
    fn test_json_file_mode_with_directory() {
        let config = RepositoryConfig::from_lookup(lookup(&[
            ("STORAGE_MODE", "json_file"),
            ("DATA_DIR", "/var/lib/fintake"),
        ]))
        .unwrap();

        assert_eq!(config.storage_mode, StorageMode::JsonFile);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/fintake"));
    }

    #[rstest]
    fn test_json_file_mode_rejects_blank_directory() {
        let result = RepositoryConfig::from_lookup(lookup(&[
            ("STORAGE_MODE", "json_file"),
            ("DATA_DIR", "  "),
        ]));

        assert_eq!(result, Err(ConfigurationError::EmptyDataDir));
    }

    #[rstest]
    fn test_json_file_factory_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let data_dir = root.path().join("nested").join("data");
        let factory = RepositoryFactory::new(RepositoryConfig {
            storage_mode: StorageMode::JsonFile,
            data_dir: data_dir.clone(),
        });

        factory.create().unwrap();

        assert!(data_dir.is_dir());
    }
}
