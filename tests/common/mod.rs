//! Shared fakes for pipeline integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use fintake::auth::{
    Claims, CodecError, HashError, PasswordHasher, SigningKey, TokenCodec,
};
use fintake::control::Maybe;
use fintake::domain::{
    FinancialProfile, FinancialSnapshot, Identity, PasswordDigest, PersonalRecord, PrincipalId,
    ProfileId, RecordId, Timestamp, UpsertOutcome,
};
use fintake::pipeline::PipelineContext;
use fintake::repository::{
    FinancialProfileRepository, IdentityRepository, PersonalRecordRepository, RepositoryError,
};
use fintake::validation::RawRequest;
use parking_lot::RwLock;
use serde_json::Value;

pub const TEST_KEY: &[u8] = b"test-signing-key";

// =============================================================================
// Stores
// =============================================================================

#[derive(Default)]
pub struct FakeIdentities {
    by_email: RwLock<HashMap<String, Identity>>,
    pub fail_lookups: RwLock<bool>,
}

impl IdentityRepository for FakeIdentities {
    fn find_by_email(&self, email: &str) -> Result<Maybe<Identity>, RepositoryError> {
        if *self.fail_lookups.read() {
            return Err(RepositoryError::StorageError("offline".to_string()));
        }
        Ok(self.by_email.read().get(email).cloned().into())
    }

    fn find_by_id(&self, id: &PrincipalId) -> Result<Maybe<Identity>, RepositoryError> {
        if *self.fail_lookups.read() {
            return Err(RepositoryError::StorageError("offline".to_string()));
        }
        Ok(self
            .by_email
            .read()
            .values()
            .find(|identity| identity.id == *id)
            .cloned()
            .into())
    }

    fn insert(&self, identity: Identity) -> Result<(), RepositoryError> {
        let mut guard = self.by_email.write();
        if guard.contains_key(&identity.email) {
            return Err(RepositoryError::DuplicateEmail(identity.email));
        }
        guard.insert(identity.email.clone(), identity);
        Ok(())
    }
}

impl FakeIdentities {
    pub fn count(&self) -> usize {
        self.by_email.read().len()
    }

    pub fn get(&self, email: &str) -> Option<Identity> {
        self.by_email.read().get(email).cloned()
    }
}

#[derive(Default)]
pub struct FakeProfiles {
    by_user: RwLock<HashMap<PrincipalId, FinancialProfile>>,
}

impl FinancialProfileRepository for FakeProfiles {
    fn find_by_user(&self, user: &PrincipalId) -> Result<Maybe<FinancialProfile>, RepositoryError> {
        Ok(self.by_user.read().get(user).cloned().into())
    }

    fn upsert(
        &self,
        user: PrincipalId,
        snapshot: FinancialSnapshot,
        at: Timestamp,
    ) -> Result<UpsertOutcome, RepositoryError> {
        let mut guard = self.by_user.write();
        if let Some(existing) = guard.get_mut(&user) {
            existing.snapshot = snapshot;
            existing.updated_at = at;
            return Ok(UpsertOutcome::Updated(existing.id));
        }
        let id = ProfileId::generate();
        guard.insert(
            user,
            FinancialProfile {
                id,
                user_id: user,
                snapshot,
                created_at: at,
                updated_at: at,
            },
        );
        Ok(UpsertOutcome::Created(id))
    }
}

impl FakeProfiles {
    pub fn count(&self) -> usize {
        self.by_user.read().len()
    }
}

#[derive(Default)]
pub struct FakeRecords {
    records: RwLock<Vec<PersonalRecord>>,
}

impl PersonalRecordRepository for FakeRecords {
    fn insert(&self, record: PersonalRecord) -> Result<RecordId, RepositoryError> {
        let id = record.id;
        self.records.write().push(record);
        Ok(id)
    }

    fn find_by_user(&self, user: &PrincipalId) -> Result<Vec<PersonalRecord>, RepositoryError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|record| record.user_id == *user)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<PersonalRecord>, RepositoryError> {
        Ok(self.records.read().clone())
    }
}

impl FakeRecords {
    pub fn count(&self) -> usize {
        self.records.read().len()
    }
}

// =============================================================================
// Crypto fakes
// =============================================================================

/// Digest is the reversed password behind a marker.
pub struct ReversingHasher;

impl PasswordHasher for ReversingHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, HashError> {
        Ok(PasswordDigest::new(format!(
            "rev:{}",
            password.chars().rev().collect::<String>()
        )))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool {
        self.hash(password)
            .is_ok_and(|candidate| candidate.as_str() == digest.as_str())
    }
}

/// Token is `email|exp|key`; the key segment stands in for a signature.
pub struct PlainCodec;

impl TokenCodec for PlainCodec {
    fn sign(&self, claims: &Claims, key: &SigningKey) -> Result<String, CodecError> {
        let key = String::from_utf8(key.as_bytes().to_vec())
            .map_err(|error| CodecError::Key(error.to_string()))?;
        Ok(format!("{}|{}|{}", claims.email, claims.exp, key))
    }

    fn parse(&self, token: &str, key: &SigningKey) -> Result<Claims, CodecError> {
        let parts: Vec<&str> = token.split('|').collect();
        let [email, exp, signature] = parts.as_slice() else {
            return Err(CodecError::Malformed);
        };
        if signature.as_bytes() != key.as_bytes() {
            return Err(CodecError::Signature);
        }
        let exp: i64 = exp
            .parse()
            .map_err(|_| CodecError::Encoding((*exp).to_string()))?;
        let claims = Claims {
            email: (*email).to_string(),
            exp,
        };
        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(CodecError::Expired);
        }
        Ok(claims)
    }
}

// =============================================================================
// Fixture
// =============================================================================

pub struct Harness {
    pub identities: Arc<FakeIdentities>,
    pub profiles: Arc<FakeProfiles>,
    pub records: Arc<FakeRecords>,
    pub context: PipelineContext,
}

impl Harness {
    pub fn new() -> Self {
        let identities = Arc::new(FakeIdentities::default());
        let profiles = Arc::new(FakeProfiles::default());
        let records = Arc::new(FakeRecords::default());
        let context = PipelineContext::new(
            identities.clone(),
            profiles.clone(),
            records.clone(),
            Arc::new(ReversingHasher),
            Arc::new(PlainCodec),
            SigningKey::new(TEST_KEY.to_vec()),
        );
        Self {
            identities,
            profiles,
            records,
            context,
        }
    }

    /// Registers `email` and returns a valid token for it.
    pub fn register_and_login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({"email": email, "password": password});
        fintake::pipeline::register(&self.context, &json_request(&body)).unwrap();
        fintake::pipeline::login(&self.context, &json_request(&body))
            .unwrap()
            .token
    }
}

pub fn json_request(value: &Value) -> RawRequest {
    RawRequest::from_value(value)
}
