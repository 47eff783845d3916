use std::collections::HashMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::offers::domain::{Offer, OfferDraft, OfferId, OfferPatch, OwnerId, WorkMode};
use crate::offers::repository::{
    InMemoryOfferRepository, OfferRepository, RepositoryError, SessionError, SessionProvider,
};
use crate::offers::{offer_router, OfferService};

pub(super) const DANA_TOKEN: &str = "token-dana";
pub(super) const OMER_TOKEN: &str = "token-omer";

pub(super) fn dana() -> OwnerId {
    OwnerId("dana".to_string())
}

pub(super) fn omer() -> OwnerId {
    OwnerId("omer".to_string())
}

#[derive(Default)]
pub(super) struct FixedSessions {
    tokens: HashMap<String, OwnerId>,
}

impl FixedSessions {
    pub(super) fn standard() -> Self {
        let mut tokens = HashMap::new();
        tokens.insert(DANA_TOKEN.to_string(), dana());
        tokens.insert(OMER_TOKEN.to_string(), omer());
        Self { tokens }
    }
}

impl SessionProvider for FixedSessions {
    fn resolve(&self, token: &str) -> Result<Option<OwnerId>, SessionError> {
        Ok(self.tokens.get(token).cloned())
    }
}

pub(super) struct OfflineSessions;

impl SessionProvider for OfflineSessions {
    fn resolve(&self, _token: &str) -> Result<Option<OwnerId>, SessionError> {
        Err(SessionError::Unavailable("identity service offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl OfferRepository for UnavailableRepository {
    fn insert(&self, _owner: &OwnerId, _draft: OfferDraft) -> Result<Offer, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _owner: &OwnerId) -> Result<Vec<Offer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _owner: &OwnerId, _id: &OfferId) -> Result<Option<Offer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(
        &self,
        _owner: &OwnerId,
        _id: &OfferId,
        _patch: OfferPatch,
    ) -> Result<Option<Offer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _owner: &OwnerId, _id: &OfferId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn draft(
    company: &str,
    salary: Option<f64>,
    work_mode: WorkMode,
    location: Option<&str>,
) -> OfferDraft {
    OfferDraft {
        company: company.to_string(),
        title: "Backend Engineer".to_string(),
        salary,
        location: location.map(str::to_string),
        work_mode,
        notes: None,
    }
}

pub(super) fn top_offer() -> OfferDraft {
    draft("Wix", Some(40_000.0), WorkMode::Remote, Some("Tel Aviv"))
}

pub(super) fn bare_offer() -> OfferDraft {
    draft("Elbit", None, WorkMode::Onsite, None)
}

pub(super) fn middle_offer() -> OfferDraft {
    draft("Intel", Some(26_000.0), WorkMode::Hybrid, Some("Haifa, North"))
}

pub(super) type TestService = OfferService<InMemoryOfferRepository, FixedSessions>;

pub(super) fn build_service() -> (TestService, Arc<InMemoryOfferRepository>) {
    let repository = Arc::new(InMemoryOfferRepository::default());
    let service = OfferService::new(repository.clone(), Arc::new(FixedSessions::standard()));
    (service, repository)
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    offer_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
