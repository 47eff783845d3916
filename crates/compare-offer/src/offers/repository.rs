use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::domain::{Offer, OfferDraft, OfferId, OfferPatch, OwnerId};

/// Owner-scoped storage so the service can be exercised against any backend.
///
/// Implementations own ids and timestamps. An offer is only visible to its owner.
pub trait OfferRepository: Send + Sync {
    fn insert(&self, owner: &OwnerId, draft: OfferDraft) -> Result<Offer, RepositoryError>;
    /// Newest first.
    fn list(&self, owner: &OwnerId) -> Result<Vec<Offer>, RepositoryError>;
    fn fetch(&self, owner: &OwnerId, id: &OfferId) -> Result<Option<Offer>, RepositoryError>;
    fn update(
        &self,
        owner: &OwnerId,
        id: &OfferId,
        patch: OfferPatch,
    ) -> Result<Option<Offer>, RepositoryError>;
    fn delete(&self, owner: &OwnerId, id: &OfferId) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Resolves an opaque session token to the owner it authenticates.
pub trait SessionProvider: Send + Sync {
    fn resolve(&self, token: &str) -> Result<Option<OwnerId>, SessionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone)]
struct StoredOffer {
    owner: OwnerId,
    sequence: u64,
    offer: Offer,
}

/// Process-local store used by the API server, the CLI and tests.
#[derive(Default, Clone)]
pub struct InMemoryOfferRepository {
    records: Arc<Mutex<HashMap<OfferId, StoredOffer>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryOfferRepository {
    fn records(&self) -> Result<MutexGuard<'_, HashMap<OfferId, StoredOffer>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("offer store lock poisoned".to_string()))
    }

    fn next_id(&self) -> (u64, OfferId) {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        (sequence, OfferId(format!("offer-{sequence:06}")))
    }
}

impl OfferRepository for InMemoryOfferRepository {
    fn insert(&self, owner: &OwnerId, draft: OfferDraft) -> Result<Offer, RepositoryError> {
        let (sequence, id) = self.next_id();
        let now = Utc::now();
        let offer = Offer {
            id: id.clone(),
            company: draft.company,
            title: draft.title,
            salary: draft.salary,
            location: draft.location,
            work_mode: draft.work_mode,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };

        let mut guard = self.records()?;
        guard.insert(
            id,
            StoredOffer {
                owner: owner.clone(),
                sequence,
                offer: offer.clone(),
            },
        );
        Ok(offer)
    }

    fn list(&self, owner: &OwnerId) -> Result<Vec<Offer>, RepositoryError> {
        let guard = self.records()?;
        let mut owned: Vec<&StoredOffer> = guard
            .values()
            .filter(|stored| &stored.owner == owner)
            .collect();
        owned.sort_by(|left, right| {
            right
                .offer
                .created_at
                .cmp(&left.offer.created_at)
                .then(right.sequence.cmp(&left.sequence))
        });
        Ok(owned.into_iter().map(|stored| stored.offer.clone()).collect())
    }

    fn fetch(&self, owner: &OwnerId, id: &OfferId) -> Result<Option<Offer>, RepositoryError> {
        let guard = self.records()?;
        Ok(guard
            .get(id)
            .filter(|stored| &stored.owner == owner)
            .map(|stored| stored.offer.clone()))
    }

    fn update(
        &self,
        owner: &OwnerId,
        id: &OfferId,
        patch: OfferPatch,
    ) -> Result<Option<Offer>, RepositoryError> {
        let mut guard = self.records()?;
        match guard.get_mut(id) {
            Some(stored) if &stored.owner == owner => {
                patch.apply(&mut stored.offer);
                stored.offer.updated_at = Utc::now();
                Ok(Some(stored.offer.clone()))
            }
            _ => Ok(None),
        }
    }

    fn delete(&self, owner: &OwnerId, id: &OfferId) -> Result<bool, RepositoryError> {
        let mut guard = self.records()?;
        let owned = guard
            .get(id)
            .map(|stored| &stored.owner == owner)
            .unwrap_or(false);
        if owned {
            guard.remove(id);
        }
        Ok(owned)
    }
}
