use campus_hub::workflows::events::{EventId, EventRecord, EventRepository};
use campus_hub::workflows::format;
use campus_hub::workflows::lottery::{Applicant, LotteryRound, RoundId, RoundRepository};
use campus_hub::workflows::RepositoryError;
use chrono::NaiveDateTime;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Rounds keyed by id so listing order follows registration order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRoundRepository {
    rounds: Arc<Mutex<BTreeMap<RoundId, LotteryRound>>>,
}

impl RoundRepository for InMemoryRoundRepository {
    fn load_rounds(&self) -> Result<Vec<LotteryRound>, RepositoryError> {
        let guard = self.rounds.lock().map_err(|_| poisoned("round"))?;
        Ok(guard.values().cloned().collect())
    }

    fn fetch_round(&self, id: RoundId) -> Result<Option<LotteryRound>, RepositoryError> {
        let guard = self.rounds.lock().map_err(|_| poisoned("round"))?;
        Ok(guard.get(&id).cloned())
    }

    fn insert_round(&self, mut round: LotteryRound) -> Result<LotteryRound, RepositoryError> {
        let mut guard = self.rounds.lock().map_err(|_| poisoned("round"))?;
        let next = guard.keys().next_back().map_or(1, |last| last.0 + 1);
        round.id = RoundId(next);
        guard.insert(round.id, round.clone());
        Ok(round)
    }

    fn save_applicants(
        &self,
        id: RoundId,
        applicants: &[Applicant],
    ) -> Result<(), RepositoryError> {
        let mut guard = self.rounds.lock().map_err(|_| poisoned("round"))?;
        let round = guard.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        if round.is_drawn {
            return Err(RepositoryError::Conflict);
        }
        round.applicants = applicants.to_vec();
        Ok(())
    }

    fn commit_draw(&self, drawn: &LotteryRound) -> Result<(), RepositoryError> {
        let mut guard = self.rounds.lock().map_err(|_| poisoned("round"))?;
        let round = guard.get_mut(&drawn.id).ok_or(RepositoryError::NotFound)?;
        if round.is_drawn {
            return Err(RepositoryError::Conflict);
        }
        *round = drawn.clone();
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEventRepository {
    records: Arc<Mutex<BTreeMap<EventId, EventRecord>>>,
}

impl EventRepository for InMemoryEventRepository {
    fn load_events(&self) -> Result<Vec<EventRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(|_| poisoned("event"))?;
        Ok(guard.values().cloned().collect())
    }

    fn fetch_event(&self, id: EventId) -> Result<Option<EventRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(|_| poisoned("event"))?;
        Ok(guard.get(&id).cloned())
    }

    fn insert_event(&self, mut record: EventRecord) -> Result<EventRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(|_| poisoned("event"))?;
        let next = guard.keys().next_back().map_or(1, |last| last.0 + 1);
        record.id = EventId(next);
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn update_event(&self, record: &EventRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(|_| poisoned("event"))?;
        match guard.get_mut(&record.id) {
            Some(stored) => {
                *stored = record.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

fn poisoned(store: &str) -> RepositoryError {
    RepositoryError::Unavailable(format!("{store} store lock poisoned"))
}

pub(crate) fn parse_minutes(raw: &str) -> Result<NaiveDateTime, String> {
    format::parse_minutes(raw).ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM-DD HH:MM"))
}
