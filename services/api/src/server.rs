use crate::cli::ServeArgs;
use crate::infra::{AppState, StaticSessionProvider};
use crate::routes::with_offer_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use compare_offer::config::AppConfig;
use compare_offer::error::AppError;
use compare_offer::offers::{InMemoryOfferRepository, OfferService};
use compare_offer::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let sessions = StaticSessionProvider::from_config(&config.sessions);
    if sessions.is_empty() {
        warn!("APP_SESSION_TOKENS is empty; every offer route will answer 401");
    }
    let offer_service = Arc::new(OfferService::with_preselect(
        Arc::new(InMemoryOfferRepository::default()),
        Arc::new(sessions),
        config.comparison.preselect_count,
    ));

    let app = with_offer_routes(offer_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "CompareOffer API ready");

    axum::serve(listener, app).await?;
    Ok(())
}
