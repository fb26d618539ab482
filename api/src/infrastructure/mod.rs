//! Infrastructure: concrete collaborators and configuration.
//!
//! This module contains the document stores, the token codec, the password
//! hasher, and the environment-driven configuration that wires them into a
//! [`PipelineContext`](fintake::pipeline::PipelineContext).

pub mod config;
pub mod factory;
pub mod in_memory;
pub mod json_file;
pub mod jwt;
pub mod password;

pub use config::{AuthConfig, ServerConfig};
pub use factory::{
    ConfigurationError, FactoryError, Repositories, RepositoryConfig, RepositoryFactory,
    StorageMode,
};
pub use in_memory::{
    InMemoryFinancialProfileRepository, InMemoryIdentityRepository,
    InMemoryPersonalRecordRepository,
};
pub use json_file::SnapshotFile;
pub use jwt::Hs256Codec;
pub use password::Argon2Hasher;
