use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use campus_hub::workflows::events::{events_router, EventRegistrationLifecycle, EventRepository};
use campus_hub::workflows::lottery::{lottery_router, RoundLotteryEngine, RoundRepository};
use campus_hub::workflows::Clock;
use rand::Rng;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_hub_routes<R, G, E, C>(
    engine: Arc<RoundLotteryEngine<R, G>>,
    lifecycle: Arc<EventRegistrationLifecycle<E, C>>,
) -> axum::Router
where
    R: RoundRepository + 'static,
    G: Rng + Send + 'static,
    E: EventRepository + 'static,
    C: Clock + 'static,
{
    lottery_router(engine)
        .merge(events_router(lifecycle))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryEventRepository, InMemoryRoundRepository};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn hub() -> axum::Router {
        let engine = Arc::new(RoundLotteryEngine::with_seed(
            Arc::new(InMemoryRoundRepository::default()),
            11,
        ));
        let lifecycle = Arc::new(EventRegistrationLifecycle::new(Arc::new(
            InMemoryEventRepository::default(),
        )));
        with_hub_routes(engine, lifecycle)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn merged_router_serves_both_workflows() {
        let app = hub();

        let rounds = app
            .clone()
            .oneshot(
                Request::get("/api/v1/lottery/rounds")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(rounds.status(), StatusCode::OK);

        let events = app
            .oneshot(
                Request::get("/api/v1/events/99")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(events.status(), StatusCode::NOT_FOUND);
    }
}
