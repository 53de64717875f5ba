use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;

use crate::workflows::clock::FixedClock;
use crate::workflows::events::domain::{EventDraft, EventId, EventRecord};
use crate::workflows::events::repository::EventRepository;
use crate::workflows::events::service::EventRegistrationLifecycle;
use crate::workflows::repository::RepositoryError;

pub(super) fn at(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M").expect("valid date-time")
}

pub(super) fn now() -> NaiveDateTime {
    at("2025-12-01 09:00")
}

pub(super) fn draft() -> EventDraft {
    EventDraft {
        id: EventId::NEW,
        owner_id: "council-2024017".to_string(),
        title: "Finals snack night".to_string(),
        location: "Library lobby".to_string(),
        description: "Snacks for everyone studying late.".to_string(),
        event_at: "2025-12-09 12:00".to_string(),
        apply_start: "2025-12-08 12:00".to_string(),
        apply_end: "2025-12-08 15:00".to_string(),
        capacity: "20".to_string(),
        target_audience: "all".to_string(),
        secret_code: "owl-42".to_string(),
        kind_index: 1,
        fee_index: 2,
    }
}

pub(super) fn build_lifecycle() -> (
    EventRegistrationLifecycle<MemoryEvents, FixedClock>,
    Arc<MemoryEvents>,
) {
    let repository = Arc::new(MemoryEvents::default());
    let lifecycle = EventRegistrationLifecycle::with_clock(repository.clone(), FixedClock(now()));
    (lifecycle, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryEvents {
    pub(super) records: Arc<Mutex<Vec<EventRecord>>>,
}

impl MemoryEvents {
    /// Simulate registrations recorded by the attendance side.
    pub(super) fn set_registered(&self, id: EventId, registered: u32) {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if let Some(record) = guard.iter_mut().find(|record| record.id == id) {
            record.registered = registered;
        }
    }
}

impl EventRepository for MemoryEvents {
    fn load_events(&self) -> Result<Vec<EventRecord>, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").clone())
    }

    fn fetch_event(&self, id: EventId) -> Result<Option<EventRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| record.id == id).cloned())
    }

    fn insert_event(&self, mut record: EventRecord) -> Result<EventRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        record.id = EventId(guard.len() as u64 + 1);
        guard.push(record.clone());
        Ok(record)
    }

    fn update_event(&self, record: &EventRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let stored = guard
            .iter_mut()
            .find(|stored| stored.id == record.id)
            .ok_or(RepositoryError::NotFound)?;
        *stored = record.clone();
        Ok(())
    }
}

/// Reads succeed, but the record is gone by the time an update lands.
#[derive(Default, Clone)]
pub(super) struct VanishingEvents {
    pub(super) inner: MemoryEvents,
}

impl EventRepository for VanishingEvents {
    fn load_events(&self) -> Result<Vec<EventRecord>, RepositoryError> {
        self.inner.load_events()
    }

    fn fetch_event(&self, id: EventId) -> Result<Option<EventRecord>, RepositoryError> {
        self.inner.fetch_event(id)
    }

    fn insert_event(&self, record: EventRecord) -> Result<EventRecord, RepositoryError> {
        self.inner.insert_event(record)
    }

    fn update_event(&self, _record: &EventRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableEvents;

impl EventRepository for UnavailableEvents {
    fn load_events(&self) -> Result<Vec<EventRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_event(&self, _id: EventId) -> Result<Option<EventRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_event(&self, _record: EventRecord) -> Result<EventRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_event(&self, _record: &EventRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
