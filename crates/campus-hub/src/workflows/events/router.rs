use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::domain::{EventDraft, EventId, SaveOutcome};
use super::repository::EventRepository;
use super::service::{EventError, EventRegistrationLifecycle};
use super::validation::EventValidationError;
use crate::workflows::clock::Clock;
use crate::workflows::repository::RepositoryError;

/// Router exposing council event listing and editing.
pub fn events_router<R, C>(lifecycle: Arc<EventRegistrationLifecycle<R, C>>) -> Router
where
    R: EventRepository + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/v1/events",
            get(list_handler::<R, C>).post(save_handler::<R, C>),
        )
        .route("/api/v1/events/:event_id", get(event_handler::<R, C>))
        .with_state(lifecycle)
}

impl EventError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EventError::Validation(EventValidationError::CapacityBelowRegistered { .. }) => {
                StatusCode::CONFLICT
            }
            EventError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EventError::NotFound(_) | EventError::Storage(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            EventError::Storage(RepositoryError::Conflict) => StatusCode::CONFLICT,
            EventError::Storage(RepositoryError::Unavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }
}

fn error_response(error: EventError) -> Response {
    let mut payload = json!({ "error": error.to_string() });
    match &error {
        EventError::Validation(EventValidationError::Format { field, value }) => {
            payload["field"] = json!(field.label());
            payload["value"] = json!(value);
        }
        EventError::Validation(EventValidationError::PastDate { field, value, now }) => {
            payload["field"] = json!(field.label());
            payload["value"] = json!(value);
            payload["now"] = json!(now);
        }
        EventError::Validation(EventValidationError::CapacityBelowRegistered {
            capacity,
            registered,
        }) => {
            payload["capacity"] = json!(capacity);
            payload["registered"] = json!(registered);
        }
        _ => {}
    }
    (error.status_code(), axum::Json(payload)).into_response()
}

pub(crate) async fn list_handler<R, C>(
    State(lifecycle): State<Arc<EventRegistrationLifecycle<R, C>>>,
) -> Response
where
    R: EventRepository + 'static,
    C: Clock + 'static,
{
    match lifecycle.list_events() {
        Ok(events) => (StatusCode::OK, axum::Json(events)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_handler<R, C>(
    State(lifecycle): State<Arc<EventRegistrationLifecycle<R, C>>>,
    axum::Json(draft): axum::Json<EventDraft>,
) -> Response
where
    R: EventRepository + 'static,
    C: Clock + 'static,
{
    match lifecycle.save(draft) {
        Ok(saved) => {
            let status = match saved.outcome {
                SaveOutcome::Created => StatusCode::CREATED,
                SaveOutcome::Updated => StatusCode::OK,
            };
            (status, axum::Json(saved)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn event_handler<R, C>(
    State(lifecycle): State<Arc<EventRegistrationLifecycle<R, C>>>,
    Path(event_id): Path<u64>,
) -> Response
where
    R: EventRepository + 'static,
    C: Clock + 'static,
{
    match lifecycle.event(EventId(event_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}
