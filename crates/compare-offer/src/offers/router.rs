use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{OfferDraft, OfferId, OfferPatch};
use super::repository::{OfferRepository, RepositoryError, SessionProvider};
use super::service::{CompareRequest, OfferService, OfferServiceError};
use crate::scoring::{redistribute, WeightConfiguration, WeightDimension};

/// Router builder exposing owner-scoped offer CRUD plus comparison endpoints.
pub fn offer_router<R, S>(service: Arc<OfferService<R, S>>) -> Router
where
    R: OfferRepository + 'static,
    S: SessionProvider + 'static,
{
    Router::new()
        .route(
            "/api/offers",
            post(create_handler::<R, S>).get(list_handler::<R, S>),
        )
        .route("/api/offers/compare", post(compare_handler::<R, S>))
        .route(
            "/api/offers/:offer_id",
            get(get_handler::<R, S>)
                .put(update_handler::<R, S>)
                .delete(delete_handler::<R, S>),
        )
        .route("/api/weights/redistribute", post(redistribute_handler))
        .with_state(service)
}

/// Token from `Authorization: Bearer <token>`, falling back to `x-auth-token`.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    bearer.or_else(|| {
        headers
            .get("x-auth-token")
            .and_then(|value| value.to_str().ok())
    })
}

pub(crate) fn error_response(error: OfferServiceError) -> Response {
    let (status, payload) = match &error {
        OfferServiceError::MissingToken | OfferServiceError::InvalidToken => (
            StatusCode::UNAUTHORIZED,
            json!({ "message": error.to_string() }),
        ),
        OfferServiceError::Validation(violation) => (
            StatusCode::BAD_REQUEST,
            json!({
                "message": "Validation error",
                "details": violation.details,
            }),
        ),
        OfferServiceError::Repository(RepositoryError::NotFound) => (
            StatusCode::NOT_FOUND,
            json!({ "message": "Offer not found" }),
        ),
        OfferServiceError::Repository(RepositoryError::Conflict) => (
            StatusCode::CONFLICT,
            json!({ "message": "Offer already exists" }),
        ),
        OfferServiceError::Session(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "message": error.to_string() }),
        ),
        OfferServiceError::Repository(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "message": error.to_string() }),
        ),
    };

    (status, Json(payload)).into_response()
}

pub(crate) async fn create_handler<R, S>(
    State(service): State<Arc<OfferService<R, S>>>,
    headers: HeaderMap,
    Json(draft): Json<OfferDraft>,
) -> Response
where
    R: OfferRepository + 'static,
    S: SessionProvider + 'static,
{
    let result = service
        .authenticate(session_token(&headers))
        .and_then(|owner| service.create(&owner, draft));

    match result {
        Ok(offer) => (StatusCode::CREATED, Json(offer)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, S>(
    State(service): State<Arc<OfferService<R, S>>>,
    headers: HeaderMap,
) -> Response
where
    R: OfferRepository + 'static,
    S: SessionProvider + 'static,
{
    let result = service
        .authenticate(session_token(&headers))
        .and_then(|owner| service.list(&owner));

    match result {
        Ok(offers) => (StatusCode::OK, Json(offers)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R, S>(
    State(service): State<Arc<OfferService<R, S>>>,
    headers: HeaderMap,
    Path(offer_id): Path<String>,
) -> Response
where
    R: OfferRepository + 'static,
    S: SessionProvider + 'static,
{
    let id = OfferId(offer_id);
    let result = service
        .authenticate(session_token(&headers))
        .and_then(|owner| service.get(&owner, &id));

    match result {
        Ok(offer) => (StatusCode::OK, Json(offer)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R, S>(
    State(service): State<Arc<OfferService<R, S>>>,
    headers: HeaderMap,
    Path(offer_id): Path<String>,
    Json(patch): Json<OfferPatch>,
) -> Response
where
    R: OfferRepository + 'static,
    S: SessionProvider + 'static,
{
    let id = OfferId(offer_id);
    let result = service
        .authenticate(session_token(&headers))
        .and_then(|owner| service.update(&owner, &id, patch));

    match result {
        Ok(offer) => (StatusCode::OK, Json(offer)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R, S>(
    State(service): State<Arc<OfferService<R, S>>>,
    headers: HeaderMap,
    Path(offer_id): Path<String>,
) -> Response
where
    R: OfferRepository + 'static,
    S: SessionProvider + 'static,
{
    let id = OfferId(offer_id);
    let result = service
        .authenticate(session_token(&headers))
        .and_then(|owner| service.delete(&owner, &id));

    match result {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Offer deleted" }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn compare_handler<R, S>(
    State(service): State<Arc<OfferService<R, S>>>,
    headers: HeaderMap,
    Json(request): Json<CompareRequest>,
) -> Response
where
    R: OfferRepository + 'static,
    S: SessionProvider + 'static,
{
    let result = service
        .authenticate(session_token(&headers))
        .and_then(|owner| service.compare(&owner, request));

    match result {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Slider move reported by the comparison view.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RedistributeRequest {
    pub dimension: WeightDimension,
    pub value: f64,
    #[serde(default)]
    pub previous: WeightConfiguration,
}

pub(crate) async fn redistribute_handler(
    Json(request): Json<RedistributeRequest>,
) -> Json<WeightConfiguration> {
    Json(redistribute(
        request.dimension,
        request.value,
        &request.previous,
    ))
}
