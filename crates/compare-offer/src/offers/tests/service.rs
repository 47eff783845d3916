use super::common::*;
use crate::offers::domain::{OfferId, OfferPatch, WorkMode};
use crate::offers::repository::{InMemoryOfferRepository, OfferRepository, RepositoryError};
use crate::offers::{CompareRequest, OfferService, OfferServiceError};
use crate::scoring::{WeightConfiguration, DEFAULT_WEIGHTS};
use std::sync::Arc;

#[test]
fn authenticate_requires_a_token() {
    let (service, _) = build_service();

    assert!(matches!(
        service.authenticate(None),
        Err(OfferServiceError::MissingToken)
    ));
    assert!(matches!(
        service.authenticate(Some("   ")),
        Err(OfferServiceError::MissingToken)
    ));
    assert!(matches!(
        service.authenticate(Some("forged")),
        Err(OfferServiceError::InvalidToken)
    ));
    assert_eq!(
        service.authenticate(Some(DANA_TOKEN)).expect("known token"),
        dana()
    );
}

#[test]
fn authenticate_propagates_session_backend_failures() {
    let service = OfferService::new(
        Arc::new(InMemoryOfferRepository::default()),
        Arc::new(OfflineSessions),
    );

    match service.authenticate(Some(DANA_TOKEN)) {
        Err(OfferServiceError::Session(_)) => {}
        other => panic!("expected session error, got {other:?}"),
    }
}

#[test]
fn create_validates_before_storing() {
    let (service, repository) = build_service();
    let mut invalid = top_offer();
    invalid.title = " ".to_string();
    invalid.salary = Some(-5.0);

    match service.create(&dana(), invalid) {
        Err(OfferServiceError::Validation(error)) => assert_eq!(error.details.len(), 2),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(repository.list(&dana()).expect("list").is_empty());
}

#[test]
fn get_update_and_delete_report_not_found_for_foreign_offers() {
    let (service, _) = build_service();
    let offer = service.create(&dana(), top_offer()).expect("create");

    assert!(matches!(
        service.get(&omer(), &offer.id),
        Err(OfferServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.update(&omer(), &offer.id, OfferPatch::default()),
        Err(OfferServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.delete(&omer(), &offer.id),
        Err(OfferServiceError::Repository(RepositoryError::NotFound))
    ));
    assert_eq!(service.get(&dana(), &offer.id).expect("owner reads"), offer);
}

#[test]
fn update_applies_validated_patch() {
    let (service, _) = build_service();
    let offer = service.create(&dana(), bare_offer()).expect("create");

    let patch = OfferPatch {
        salary: Some(31_000.0),
        location: Some("  Center  ".to_string()),
        work_mode: Some(WorkMode::Hybrid),
        ..OfferPatch::default()
    };
    let updated = service
        .update(&dana(), &offer.id, patch)
        .expect("update succeeds");

    assert_eq!(updated.salary, Some(31_000.0));
    assert_eq!(updated.location.as_deref(), Some("Center"));
    assert_eq!(updated.company, offer.company);
}

#[test]
fn compare_preselects_three_newest_offers() {
    let (service, _) = build_service();
    let oldest = service.create(&dana(), top_offer()).expect("create");
    service.create(&dana(), bare_offer()).expect("create");
    service.create(&dana(), middle_offer()).expect("create");
    service
        .create(
            &dana(),
            draft("Amdocs", Some(15_000.0), WorkMode::Onsite, Some("Raanana")),
        )
        .expect("create");

    let view = service
        .compare(&dana(), CompareRequest::default())
        .expect("compare succeeds");

    assert_eq!(view.ranked.len(), 3);
    assert!(view
        .ranked
        .iter()
        .all(|entry| entry.offer_id != oldest.id));
    assert_eq!(view.weights, DEFAULT_WEIGHTS);
    assert_eq!(view.best_offer.as_ref(), view.ranked.first());
}

#[test]
fn compare_honours_explicit_selection_and_weights() {
    let (service, _) = build_service();
    let top = service.create(&dana(), top_offer()).expect("create");
    let bare = service.create(&dana(), bare_offer()).expect("create");
    let foreign = service.create(&omer(), middle_offer()).expect("create");

    let request = CompareRequest {
        selected_ids: Some(vec![
            bare.id.clone(),
            foreign.id.clone(),
            top.id.clone(),
            OfferId("offer-999999".to_string()),
        ]),
        weights: Some(WeightConfiguration::new(0.0, 1.0, 0.0).expect("valid")),
    };
    let view = service.compare(&dana(), request).expect("compare succeeds");

    let ranked: Vec<&OfferId> = view.ranked.iter().map(|entry| &entry.offer_id).collect();
    assert_eq!(ranked, vec![&top.id, &bare.id]);
    assert_eq!(view.ranked[0].rank, 1);
    assert_eq!(view.ranked[0].score, 1.0);
    assert_eq!(view.ranked[1].score, 0.4);
    assert_eq!(
        view.ignored_ids,
        vec![foreign.id, OfferId("offer-999999".to_string())]
    );
}

#[test]
fn compare_with_no_offers_has_no_best_offer() {
    let (service, _) = build_service();

    let view = service
        .compare(&dana(), CompareRequest::default())
        .expect("compare succeeds");

    assert!(view.ranked.is_empty());
    assert!(view.best_offer.is_none());
}

#[test]
fn repository_failures_surface_as_repository_errors() {
    let service = OfferService::new(
        Arc::new(UnavailableRepository),
        Arc::new(FixedSessions::standard()),
    );

    assert!(matches!(
        service.list(&dana()),
        Err(OfferServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert!(matches!(
        service.compare(&dana(), CompareRequest::default()),
        Err(OfferServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}
