use super::domain::{EventId, EventRecord};
use crate::workflows::repository::RepositoryError;

/// Storage abstraction for council events.
pub trait EventRepository: Send + Sync {
    fn load_events(&self) -> Result<Vec<EventRecord>, RepositoryError>;

    fn fetch_event(&self, id: EventId) -> Result<Option<EventRecord>, RepositoryError>;

    /// Store a record carrying [`EventId::NEW`] and return it with its assigned id.
    fn insert_event(&self, record: EventRecord) -> Result<EventRecord, RepositoryError>;

    fn update_event(&self, record: &EventRecord) -> Result<(), RepositoryError>;
}
