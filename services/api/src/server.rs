use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryEventRepository, InMemoryRoundRepository};
use crate::routes::with_hub_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use campus_hub::config::AppConfig;
use campus_hub::error::AppError;
use campus_hub::telemetry;
use campus_hub::workflows::events::EventRegistrationLifecycle;
use campus_hub::workflows::lottery::RoundLotteryEngine;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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

    let engine = Arc::new(RoundLotteryEngine::from_config(
        Arc::new(InMemoryRoundRepository::default()),
        &config.lottery,
    ));
    let lifecycle = Arc::new(EventRegistrationLifecycle::new(Arc::new(
        InMemoryEventRepository::default(),
    )));

    let app = with_hub_routes(engine, lifecycle)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        seeded_draws = config.lottery.draw_seed.is_some(),
        "campus hub ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
