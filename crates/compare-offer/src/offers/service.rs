use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{Offer, OfferDraft, OfferId, OfferPatch, OfferValidationError, OwnerId};
use super::repository::{OfferRepository, RepositoryError, SessionError, SessionProvider};
use crate::comparison::{ComparisonSession, ComparisonView};
use crate::scoring::{WeightConfiguration, DEFAULT_WEIGHTS};

/// Number of offers a comparison starts with when the caller names none.
pub const DEFAULT_PRESELECT_COUNT: usize = 3;

/// Service composing the session provider, the offer repository and the comparison engine.
pub struct OfferService<R, S> {
    repository: Arc<R>,
    sessions: Arc<S>,
    preselect_count: usize,
}

/// Body of a comparison request. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompareRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_ids: Option<Vec<OfferId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightConfiguration>,
}

impl<R, S> OfferService<R, S>
where
    R: OfferRepository + 'static,
    S: SessionProvider + 'static,
{
    pub fn new(repository: Arc<R>, sessions: Arc<S>) -> Self {
        Self::with_preselect(repository, sessions, DEFAULT_PRESELECT_COUNT)
    }

    pub fn with_preselect(repository: Arc<R>, sessions: Arc<S>, preselect_count: usize) -> Self {
        Self {
            repository,
            sessions,
            preselect_count,
        }
    }

    /// Resolve the caller's token to an owner.
    pub fn authenticate(&self, token: Option<&str>) -> Result<OwnerId, OfferServiceError> {
        let token = token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(OfferServiceError::MissingToken)?;

        match self.sessions.resolve(token)? {
            Some(owner) => Ok(owner),
            None => {
                warn!("rejected unknown session token");
                Err(OfferServiceError::InvalidToken)
            }
        }
    }

    pub fn create(&self, owner: &OwnerId, draft: OfferDraft) -> Result<Offer, OfferServiceError> {
        let draft = draft.validated()?;
        let offer = self.repository.insert(owner, draft)?;
        info!(offer_id = %offer.id, owner = %owner.0, "offer created");
        Ok(offer)
    }

    pub fn list(&self, owner: &OwnerId) -> Result<Vec<Offer>, OfferServiceError> {
        Ok(self.repository.list(owner)?)
    }

    pub fn get(&self, owner: &OwnerId, id: &OfferId) -> Result<Offer, OfferServiceError> {
        let offer = self
            .repository
            .fetch(owner, id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(offer)
    }

    pub fn update(
        &self,
        owner: &OwnerId,
        id: &OfferId,
        patch: OfferPatch,
    ) -> Result<Offer, OfferServiceError> {
        let patch = patch.validated()?;
        let offer = self
            .repository
            .update(owner, id, patch)?
            .ok_or(RepositoryError::NotFound)?;
        info!(offer_id = %offer.id, owner = %owner.0, "offer updated");
        Ok(offer)
    }

    pub fn delete(&self, owner: &OwnerId, id: &OfferId) -> Result<(), OfferServiceError> {
        if !self.repository.delete(owner, id)? {
            return Err(RepositoryError::NotFound.into());
        }
        info!(offer_id = %id, owner = %owner.0, "offer deleted");
        Ok(())
    }

    /// Rank the owner's offers under the requested selection and weights.
    ///
    /// Without explicit ids the leading offers (newest first) are selected. Ids that do not
    /// belong to the owner are reported back instead of failing the request.
    pub fn compare(
        &self,
        owner: &OwnerId,
        request: CompareRequest,
    ) -> Result<ComparisonView, OfferServiceError> {
        let offers = self.repository.list(owner)?;
        let weights = request.weights.unwrap_or(DEFAULT_WEIGHTS);
        let mut session = ComparisonSession::with_weights(&offers, weights);

        let mut ignored_ids = Vec::new();
        match request.selected_ids {
            Some(ids) => {
                for id in ids {
                    if !session.select_offer(&id) {
                        ignored_ids.push(id);
                    }
                }
            }
            None => session.preselect_leading(self.preselect_count),
        }

        if !ignored_ids.is_empty() {
            warn!(
                owner = %owner.0,
                ignored = ignored_ids.len(),
                "comparison referenced unknown offers"
            );
        }

        let view = ComparisonView::from_session(&session, ignored_ids);
        debug!(
            owner = %owner.0,
            selected = view.ranked.len(),
            best = ?view.best_offer.as_ref().map(|best| &best.offer_id),
            "comparison ranked"
        );
        Ok(view)
    }
}

/// Error raised by the offer service.
#[derive(Debug, thiserror::Error)]
pub enum OfferServiceError {
    #[error("no token provided")]
    MissingToken,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error(transparent)]
    Validation(#[from] OfferValidationError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
