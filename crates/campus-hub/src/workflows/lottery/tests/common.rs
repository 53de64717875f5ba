use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::lottery::domain::{
    Applicant, ApplicantEntry, LotteryRound, NewRound, RoundId,
};
use crate::workflows::lottery::repository::RoundRepository;
use crate::workflows::lottery::service::RoundLotteryEngine;
use crate::workflows::repository::RepositoryError;

pub(super) fn new_round(name: &str, winner_count: i64) -> NewRound {
    NewRound {
        name: name.to_string(),
        prize_name: "Campus cafe voucher".to_string(),
        winner_count,
        announcement_date: "2025-12-20".to_string(),
        application_start: "2025-12-01 09:00".to_string(),
        application_end: "2025-12-15 18:00:00".to_string(),
        pickup_location: "Student union, room 101".to_string(),
        pickup_start: "2025-12-21 10:00".to_string(),
        pickup_end: "2025-12-23 17:00".to_string(),
    }
}

pub(super) fn entry(name: &str, student_id: &str) -> ApplicantEntry {
    ApplicantEntry {
        name: name.to_string(),
        student_id: student_id.to_string(),
    }
}

pub(super) fn build_engine() -> (RoundLotteryEngine<MemoryRounds>, Arc<MemoryRounds>) {
    let repository = Arc::new(MemoryRounds::default());
    let engine = RoundLotteryEngine::with_seed(repository.clone(), 7);
    (engine, repository)
}

/// Register a round and enter one applicant per name, ids `S-<index>`.
pub(super) fn seeded_round<R>(
    engine: &RoundLotteryEngine<R>,
    name: &str,
    winner_count: i64,
    applicants: &[&str],
) -> RoundId
where
    R: RoundRepository + 'static,
{
    let round_id = engine
        .add_round(new_round(name, winner_count))
        .expect("round registers");
    for (index, applicant) in applicants.iter().enumerate() {
        engine
            .enter(round_id, entry(applicant, &format!("S-{index:03}")))
            .expect("entry accepted");
    }
    round_id
}

#[derive(Default, Clone)]
pub(super) struct MemoryRounds {
    pub(super) rounds: Arc<Mutex<Vec<LotteryRound>>>,
}

impl RoundRepository for MemoryRounds {
    fn load_rounds(&self) -> Result<Vec<LotteryRound>, RepositoryError> {
        Ok(self.rounds.lock().expect("repository mutex poisoned").clone())
    }

    fn fetch_round(&self, id: RoundId) -> Result<Option<LotteryRound>, RepositoryError> {
        let guard = self.rounds.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|round| round.id == id).cloned())
    }

    fn insert_round(&self, mut round: LotteryRound) -> Result<LotteryRound, RepositoryError> {
        let mut guard = self.rounds.lock().expect("repository mutex poisoned");
        round.id = RoundId(guard.len() as u64 + 1);
        guard.push(round.clone());
        Ok(round)
    }

    fn save_applicants(
        &self,
        id: RoundId,
        applicants: &[Applicant],
    ) -> Result<(), RepositoryError> {
        let mut guard = self.rounds.lock().expect("repository mutex poisoned");
        let stored = guard
            .iter_mut()
            .find(|round| round.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if stored.is_drawn {
            return Err(RepositoryError::Conflict);
        }
        stored.applicants = applicants.to_vec();
        Ok(())
    }

    fn commit_draw(&self, round: &LotteryRound) -> Result<(), RepositoryError> {
        let mut guard = self.rounds.lock().expect("repository mutex poisoned");
        let stored = guard
            .iter_mut()
            .find(|stored| stored.id == round.id)
            .ok_or(RepositoryError::NotFound)?;
        if stored.is_drawn {
            return Err(RepositoryError::Conflict);
        }
        *stored = round.clone();
        Ok(())
    }
}

/// Accepts everything except the draw commit.
#[derive(Default, Clone)]
pub(super) struct CommitFailsRounds {
    pub(super) inner: MemoryRounds,
}

impl RoundRepository for CommitFailsRounds {
    fn load_rounds(&self) -> Result<Vec<LotteryRound>, RepositoryError> {
        self.inner.load_rounds()
    }

    fn fetch_round(&self, id: RoundId) -> Result<Option<LotteryRound>, RepositoryError> {
        self.inner.fetch_round(id)
    }

    fn insert_round(&self, round: LotteryRound) -> Result<LotteryRound, RepositoryError> {
        self.inner.insert_round(round)
    }

    fn save_applicants(
        &self,
        id: RoundId,
        applicants: &[Applicant],
    ) -> Result<(), RepositoryError> {
        self.inner.save_applicants(id, applicants)
    }

    fn commit_draw(&self, _round: &LotteryRound) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("write timed out".to_string()))
    }
}

/// Commits draws but cannot list rounds.
#[derive(Default, Clone)]
pub(super) struct ReloadFailsRounds {
    pub(super) inner: MemoryRounds,
}

impl RoundRepository for ReloadFailsRounds {
    fn load_rounds(&self) -> Result<Vec<LotteryRound>, RepositoryError> {
        Err(RepositoryError::Unavailable("listing timed out".to_string()))
    }

    fn fetch_round(&self, id: RoundId) -> Result<Option<LotteryRound>, RepositoryError> {
        self.inner.fetch_round(id)
    }

    fn insert_round(&self, round: LotteryRound) -> Result<LotteryRound, RepositoryError> {
        self.inner.insert_round(round)
    }

    fn save_applicants(
        &self,
        id: RoundId,
        applicants: &[Applicant],
    ) -> Result<(), RepositoryError> {
        self.inner.save_applicants(id, applicants)
    }

    fn commit_draw(&self, round: &LotteryRound) -> Result<(), RepositoryError> {
        self.inner.commit_draw(round)
    }
}

pub(super) struct UnavailableRounds;

impl RoundRepository for UnavailableRounds {
    fn load_rounds(&self) -> Result<Vec<LotteryRound>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_round(&self, _id: RoundId) -> Result<Option<LotteryRound>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_round(&self, _round: LotteryRound) -> Result<LotteryRound, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_applicants(
        &self,
        _id: RoundId,
        _applicants: &[Applicant],
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn commit_draw(&self, _round: &LotteryRound) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
