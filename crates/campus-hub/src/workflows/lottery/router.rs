use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use rand::Rng;
use serde_json::json;

use super::domain::{ApplicantEntry, NewRound, RoundId, RoundSummary};
use super::intake::RoundValidationError;
use super::repository::RoundRepository;
use super::service::{LotteryError, RoundLotteryEngine};
use crate::workflows::repository::RepositoryError;

/// Router exposing round registration, entries and draws.
pub fn lottery_router<R, G>(engine: Arc<RoundLotteryEngine<R, G>>) -> Router
where
    R: RoundRepository + 'static,
    G: Rng + Send + 'static,
{
    Router::new()
        .route(
            "/api/v1/lottery/rounds",
            get(list_handler::<R, G>).post(create_handler::<R, G>),
        )
        .route(
            "/api/v1/lottery/rounds/:round_id",
            get(round_handler::<R, G>),
        )
        .route(
            "/api/v1/lottery/rounds/:round_id/applicants",
            post(enter_handler::<R, G>),
        )
        .route(
            "/api/v1/lottery/rounds/:round_id/draw",
            post(draw_handler::<R, G>),
        )
        .with_state(engine)
}

impl LotteryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LotteryError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LotteryError::RoundNotFound(_) => StatusCode::NOT_FOUND,
            LotteryError::AlreadyDrawn { .. } | LotteryError::EmptyPool { .. } => {
                StatusCode::CONFLICT
            }
            LotteryError::Storage(RepositoryError::Conflict) => StatusCode::CONFLICT,
            LotteryError::Storage(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            LotteryError::Storage(RepositoryError::Unavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }
}

fn error_response(error: LotteryError) -> Response {
    let mut payload = json!({ "error": error.to_string() });
    match &error {
        LotteryError::Validation(RoundValidationError::Required(field))
        | LotteryError::Validation(RoundValidationError::Format { field, .. })
        | LotteryError::Validation(RoundValidationError::PeriodReversed {
            field, ..
        }) => {
            payload["field"] = json!(field.label());
        }
        LotteryError::EmptyPool { winner_count, .. } => {
            payload["winner_count"] = json!(winner_count);
            payload["pool_size"] = json!(0);
        }
        _ => {}
    }
    (error.status_code(), axum::Json(payload)).into_response()
}

pub(crate) async fn list_handler<R, G>(
    State(engine): State<Arc<RoundLotteryEngine<R, G>>>,
) -> Response
where
    R: RoundRepository + 'static,
    G: Rng + Send + 'static,
{
    match engine.list_rounds() {
        Ok(rounds) => {
            let summaries: Vec<RoundSummary> = rounds.iter().map(|round| round.summary()).collect();
            (StatusCode::OK, axum::Json(summaries)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R, G>(
    State(engine): State<Arc<RoundLotteryEngine<R, G>>>,
    axum::Json(request): axum::Json<NewRound>,
) -> Response
where
    R: RoundRepository + 'static,
    G: Rng + Send + 'static,
{
    match engine.add_round(request) {
        Ok(round_id) => {
            (StatusCode::CREATED, axum::Json(json!({ "round_id": round_id }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn round_handler<R, G>(
    State(engine): State<Arc<RoundLotteryEngine<R, G>>>,
    Path(round_id): Path<u64>,
) -> Response
where
    R: RoundRepository + 'static,
    G: Rng + Send + 'static,
{
    match engine.round(RoundId(round_id)) {
        Ok(round) => (StatusCode::OK, axum::Json(round)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn enter_handler<R, G>(
    State(engine): State<Arc<RoundLotteryEngine<R, G>>>,
    Path(round_id): Path<u64>,
    axum::Json(entry): axum::Json<ApplicantEntry>,
) -> Response
where
    R: RoundRepository + 'static,
    G: Rng + Send + 'static,
{
    match engine.enter(RoundId(round_id), entry) {
        Ok(round) => (StatusCode::OK, axum::Json(round)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn draw_handler<R, G>(
    State(engine): State<Arc<RoundLotteryEngine<R, G>>>,
    Path(round_id): Path<u64>,
) -> Response
where
    R: RoundRepository + 'static,
    G: Rng + Send + 'static,
{
    match engine.draw(RoundId(round_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}
