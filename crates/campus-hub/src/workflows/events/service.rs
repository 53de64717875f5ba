use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{EventDraft, EventId, EventRecord, EventStatus, SaveOutcome, SavedEvent};
use super::repository::EventRepository;
use super::validation::{validate_draft, EventValidationError, ValidatedFields};
use crate::workflows::clock::{Clock, SystemClock};
use crate::workflows::repository::RepositoryError;

/// Validates and commits council event edits.
///
/// Each save works from an immutable draft: it is validated against the
/// clock, a fresh record is built, and only the committed record is handed
/// back. Edits re-read the stored record so registration counts and status
/// come from storage rather than from the caller.
pub struct EventRegistrationLifecycle<R, C = SystemClock> {
    repository: Arc<R>,
    clock: C,
}

impl<R> EventRegistrationLifecycle<R, SystemClock>
where
    R: EventRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_clock(repository, SystemClock)
    }
}

impl<R, C> EventRegistrationLifecycle<R, C>
where
    R: EventRepository + 'static,
    C: Clock,
{
    pub fn with_clock(repository: Arc<R>, clock: C) -> Self {
        Self { repository, clock }
    }

    pub fn list_events(&self) -> Result<Vec<EventRecord>, EventError> {
        Ok(self.repository.load_events()?)
    }

    pub fn event(&self, id: EventId) -> Result<EventRecord, EventError> {
        self.repository
            .fetch_event(id)?
            .ok_or(EventError::NotFound(id))
    }

    /// Create (sentinel id) or update an event from a form draft.
    pub fn save(&self, draft: EventDraft) -> Result<SavedEvent, EventError> {
        let now = self.clock.now();
        let fields = validate_draft(&draft, now).map_err(|err| {
            warn!(event_id = %draft.id, error = %err, "rejected event edit");
            err
        })?;

        let outcome = if draft.id.is_new() {
            SaveOutcome::Created
        } else {
            SaveOutcome::Updated
        };

        let record = match outcome {
            SaveOutcome::Created => self.created_record(draft, fields),
            SaveOutcome::Updated => self.updated_record(draft, fields)?,
        };

        let committed = match outcome {
            SaveOutcome::Created => self.repository.insert_event(record)?,
            SaveOutcome::Updated => {
                self.repository
                    .update_event(&record)
                    .map_err(|err| missing_as_not_found(err, record.id))?;
                record
            }
        };

        info!(
            event_id = %committed.id,
            title = %committed.title,
            capacity = committed.capacity,
            ?outcome,
            "council event saved"
        );

        Ok(SavedEvent {
            record: committed,
            outcome,
        })
    }

    fn created_record(&self, draft: EventDraft, fields: ValidatedFields) -> EventRecord {
        EventRecord {
            id: EventId::NEW,
            title: fields.title,
            location: draft.location.trim().to_string(),
            description: draft.description,
            owner_id: draft.owner_id.trim().to_string(),
            event_at: fields.event_at,
            apply_start: fields.apply_start,
            apply_end: fields.apply_end,
            capacity: fields.capacity,
            registered: 0,
            status: EventStatus::Active,
            kind: fields.kind,
            fee: fields.fee,
            target_audience: draft.target_audience.trim().to_string(),
            secret_code: draft.secret_code.trim().to_string(),
        }
    }

    fn updated_record(
        &self,
        draft: EventDraft,
        fields: ValidatedFields,
    ) -> Result<EventRecord, EventError> {
        let existing = self.event(draft.id)?;

        if fields.capacity > 0 && fields.capacity < existing.registered {
            let err = EventValidationError::CapacityBelowRegistered {
                capacity: fields.capacity,
                registered: existing.registered,
            };
            warn!(event_id = %existing.id, error = %err, "rejected event edit");
            return Err(err.into());
        }

        Ok(EventRecord {
            id: existing.id,
            title: fields.title,
            location: draft.location.trim().to_string(),
            description: draft.description,
            owner_id: existing.owner_id,
            event_at: fields.event_at,
            apply_start: fields.apply_start,
            apply_end: fields.apply_end,
            capacity: fields.capacity,
            registered: existing.registered,
            status: existing.status,
            kind: fields.kind,
            fee: fields.fee,
            target_audience: draft.target_audience.trim().to_string(),
            secret_code: draft.secret_code.trim().to_string(),
        })
    }
}

fn missing_as_not_found(err: RepositoryError, id: EventId) -> EventError {
    match err {
        RepositoryError::NotFound => EventError::NotFound(id),
        other => EventError::Storage(other),
    }
}

/// Error raised by the event lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error(transparent)]
    Validation(#[from] EventValidationError),
    #[error("event {0} not found")]
    NotFound(EventId),
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}
