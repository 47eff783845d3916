//! Owner-scoped job offer records: validation, storage, service facade and HTTP routes.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    InvalidWorkMode, Offer, OfferDraft, OfferId, OfferPatch, OfferValidationError, OwnerId,
    WorkMode,
};
pub use repository::{
    InMemoryOfferRepository, OfferRepository, RepositoryError, SessionError, SessionProvider,
};
pub use router::{offer_router, RedistributeRequest};
pub use service::{CompareRequest, OfferService, OfferServiceError, DEFAULT_PRESELECT_COUNT};
