//! Document stores held in memory.
//!
//! Each store keeps its record set behind a `parking_lot::RwLock`. A store
//! built with [`with_snapshot`](InMemoryIdentityRepository::with_snapshot)
//! also rewrites its [`SnapshotFile`] after every write while still holding
//! the write lock; if the snapshot cannot be written, the in-memory change is
//! rolled back and the write fails.
//!
//! # Atomicity
//!
//! - Identity insert checks for a duplicate email and inserts under one write
//!   lock.
//! - Financial upsert finds the principal's profile and replaces or inserts
//!   it under one write lock, so concurrent upserts for the same principal
//!   leave exactly one profile.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use fintake::control::Maybe;
use fintake::domain::{
    FinancialProfile, FinancialSnapshot, Identity, PersonalRecord, PrincipalId, ProfileId,
    RecordId, Timestamp, UpsertOutcome,
};
use fintake::repository::{
    FinancialProfileRepository, IdentityRepository, PersonalRecordRepository, RepositoryError,
};

use super::json_file::SnapshotFile;

fn persist<'a, T, I>(snapshot: Option<&SnapshotFile>, documents: I) -> Result<(), RepositoryError>
where
    T: serde::Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    snapshot.map_or(Ok(()), |file| file.save(documents))
}

// =============================================================================
// Identities
// =============================================================================

/// Identity store keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<BTreeMap<String, Identity>>,
    snapshot: Option<SnapshotFile>,
}

impl InMemoryIdentityRepository {
    /// Creates an empty, unpersisted store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `snapshot` and keeps it current after every write.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read.
    pub fn with_snapshot(snapshot: SnapshotFile) -> Result<Self, RepositoryError> {
        let identities = snapshot
            .load::<Identity>()?
            .into_iter()
            .map(|identity| (identity.email.clone(), identity))
            .collect();
        Ok(Self {
            identities: RwLock::new(identities),
            snapshot: Some(snapshot),
        })
    }

    /// Number of stored identities.
    pub fn len(&self) -> usize {
        self.identities.read().len()
    }

    /// Returns `true` if no identity is stored.
    pub fn is_empty(&self) -> bool {
        self.identities.read().is_empty()
    }
}

impl IdentityRepository for InMemoryIdentityRepository {
    fn find_by_email(&self, email: &str) -> Result<Maybe<Identity>, RepositoryError> {
        Ok(self.identities.read().get(email).cloned().into())
    }

    fn find_by_id(&self, id: &PrincipalId) -> Result<Maybe<Identity>, RepositoryError> {
        Ok(self
            .identities
            .read()
            .values()
            .find(|identity| identity.id == *id)
            .cloned()
            .into())
    }

    fn insert(&self, identity: Identity) -> Result<(), RepositoryError> {
        let mut identities = self.identities.write();
        if identities.contains_key(&identity.email) {
            return Err(RepositoryError::DuplicateEmail(identity.email));
        }

        let email = identity.email.clone();
        identities.insert(email.clone(), identity);
        if let Err(error) = persist(self.snapshot.as_ref(), identities.values()) {
            identities.remove(&email);
            return Err(error);
        }
        Ok(())
    }
}

// =============================================================================
// Financial profiles
// =============================================================================

/// Financial profile store, at most one profile per principal.
#[derive(Debug, Default)]
pub struct InMemoryFinancialProfileRepository {
    profiles: RwLock<BTreeMap<PrincipalId, FinancialProfile>>,
    snapshot: Option<SnapshotFile>,
}

impl InMemoryFinancialProfileRepository {
    /// Creates an empty, unpersisted store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `snapshot` and keeps it current after every write.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read.
    pub fn with_snapshot(snapshot: SnapshotFile) -> Result<Self, RepositoryError> {
        let profiles = snapshot
            .load::<FinancialProfile>()?
            .into_iter()
            .map(|profile| (profile.user_id, profile))
            .collect();
        Ok(Self {
            profiles: RwLock::new(profiles),
            snapshot: Some(snapshot),
        })
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    /// Returns `true` if no profile is stored.
    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }
}

impl FinancialProfileRepository for InMemoryFinancialProfileRepository {
    fn find_by_user(&self, user: &PrincipalId) -> Result<Maybe<FinancialProfile>, RepositoryError> {
        Ok(self.profiles.read().get(user).cloned().into())
    }

    fn upsert(
        &self,
        user: PrincipalId,
        snapshot: FinancialSnapshot,
        at: Timestamp,
    ) -> Result<UpsertOutcome, RepositoryError> {
        let mut profiles = self.profiles.write();
        let previous = profiles.get(&user).cloned();

        let (profile, outcome) = match &previous {
            Some(existing) => (
                FinancialProfile {
                    snapshot,
                    updated_at: at,
                    ..existing.clone()
                },
                UpsertOutcome::Updated(existing.id),
            ),
            None => {
                let id = ProfileId::generate();
                (
                    FinancialProfile {
                        id,
                        user_id: user,
                        snapshot,
                        created_at: at,
                        updated_at: at,
                    },
                    UpsertOutcome::Created(id),
                )
            }
        };

        profiles.insert(user, profile);
        if let Err(error) = persist(self.snapshot.as_ref(), profiles.values()) {
            match previous {
                Some(existing) => profiles.insert(user, existing),
                None => profiles.remove(&user),
            };
            return Err(error);
        }
        Ok(outcome)
    }
}

// =============================================================================
// Personal records
// =============================================================================

/// Personal record store in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryPersonalRecordRepository {
    records: RwLock<Vec<PersonalRecord>>,
    snapshot: Option<SnapshotFile>,
}

impl InMemoryPersonalRecordRepository {
    /// Creates an empty, unpersisted store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `snapshot` and keeps it current after every write.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read.
    pub fn with_snapshot(snapshot: SnapshotFile) -> Result<Self, RepositoryError> {
        Ok(Self {
            records: RwLock::new(snapshot.load()?),
            snapshot: Some(snapshot),
        })
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if no record is stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl PersonalRecordRepository for InMemoryPersonalRecordRepository {
    fn insert(&self, record: PersonalRecord) -> Result<RecordId, RepositoryError> {
        let id = record.id;
        let mut records = self.records.write();
        records.push(record);
        if let Err(error) = persist(self.snapshot.as_ref(), records.iter()) {
            records.pop();
            return Err(error);
        }
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
