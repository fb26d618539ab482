//! Collaborators injected into every pipeline.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;

use crate::auth::{PasswordHasher, SigningKey, TokenCodec};
use crate::repository::{FinancialProfileRepository, IdentityRepository, PersonalRecordRepository};

/// Default lifetime of a login token.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Explicitly owned handles to every collaborator a pipeline may call.
///
/// Cheap to clone; built once at startup and shared by all requests.
#[derive(Clone)]
pub struct PipelineContext {
    /// Account store.
    pub identities: Arc<dyn IdentityRepository>,
    /// Financial profile store.
    pub financial_profiles: Arc<dyn FinancialProfileRepository>,
    /// Personal record store.
    pub personal_records: Arc<dyn PersonalRecordRepository>,
    /// Password hashing collaborator.
    pub hasher: Arc<dyn PasswordHasher>,
    /// Token signing collaborator.
    pub codec: Arc<dyn TokenCodec>,
    /// Process-wide signing secret.
    pub signing_key: SigningKey,
    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
}

impl PipelineContext {
    /// Creates a context with the default token lifetime.
    #[must_use]
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        financial_profiles: Arc<dyn FinancialProfileRepository>,
        personal_records: Arc<dyn PersonalRecordRepository>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<dyn TokenCodec>,
        signing_key: SigningKey,
    ) -> Self {
        Self {
            identities,
            financial_profiles,
            personal_records,
            hasher,
            codec,
            signing_key,
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Overrides the token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

impl fmt::Debug for PipelineContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PipelineContext")
            .field("signing_key", &self.signing_key)
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}
