//! Server and authentication settings.
//!
//! # Environment Variables
//!
//! - `HOST`: bind address (default: `0.0.0.0`)
//! - `PORT`: bind port (default: `5000`)
//! - `SECRET_KEY`: token signing secret; a random 32-byte key is generated
//!   per process when unset
//! - `TOKEN_TTL_HOURS`: token lifetime in hours, at most one year
//!   (default: `24`)

use std::env;
use std::net::SocketAddr;

use chrono::Duration;

use fintake::auth::SigningKey;
use fintake::pipeline::DEFAULT_TOKEN_TTL_HOURS;

use super::factory::ConfigurationError;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port.
pub const DEFAULT_PORT: u16 = 5000;
/// Longest accepted token lifetime, in hours.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 366;
/// Length of a generated signing key.
pub const GENERATED_KEY_LENGTH: usize = 32;

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// =============================================================================
// Server
// =============================================================================

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `HOST` and `PORT`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidPort` if `PORT` is not a port number.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads `HOST` and `PORT` from `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = present(lookup("HOST")).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match present(lookup("PORT")) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigurationError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }

    /// Resolves the bind address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidAddress` if `host` is not an IP address.
    pub fn socket_address(&self) -> Result<SocketAddr, ConfigurationError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|_| ConfigurationError::InvalidAddress(address))
    }
}

// =============================================================================
// Authentication
// =============================================================================

/// Token signing settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Process-wide signing secret.
    pub signing_key: SigningKey,
    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
    /// `true` when no `SECRET_KEY` was configured and a random key was drawn.
    pub generated_key: bool,
}

impl AuthConfig {
    /// Reads `SECRET_KEY` and `TOKEN_TTL_HOURS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidTokenTtl` if `TOKEN_TTL_HOURS` is
    /// not an integer in `1..=MAX_TOKEN_TTL_HOURS`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads `SECRET_KEY` and `TOKEN_TTL_HOURS` from `lookup`.
    ///
    /// # Errors
    ///
    /// See [`AuthConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_ttl = match present(lookup("TOKEN_TTL_HOURS")) {
            Some(value) => match value
                .parse::<i64>()
                .ok()
                .filter(|hours| (1..=MAX_TOKEN_TTL_HOURS).contains(hours))
                .and_then(Duration::try_hours)
            {
                Some(ttl) => ttl,
                None => return Err(ConfigurationError::InvalidTokenTtl(value)),
            },
            None => Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        };

        let (signing_key, generated_key) = match present(lookup("SECRET_KEY")) {
            Some(secret) => (SigningKey::new(secret.into_bytes()), false),
            None => (
                SigningKey::new(rand::random::<[u8; GENERATED_KEY_LENGTH]>().to_vec()),
                true,
            ),
        };

        Ok(Self {
            signing_key,
            token_ttl,
            generated_key,
        })
    }
}
