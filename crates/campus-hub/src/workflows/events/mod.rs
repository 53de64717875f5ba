//! Council event registration: create-or-update edits validated against
//! their registration window.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    EventDraft, EventField, EventId, EventKind, EventRecord, EventStatus, FeeRequirement,
    SaveOutcome, SavedEvent,
};
pub use repository::EventRepository;
pub use router::events_router;
pub use service::{EventError, EventRegistrationLifecycle};
pub use validation::EventValidationError;
