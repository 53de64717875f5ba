use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use super::domain::{ApplicantEntry, DrawResult, LotteryRound, NewRound, RoundId};
use super::draw::draw_round;
use super::intake::{apply_entry, round_from_request, RoundValidationError};
use super::locks::RoundLocks;
use super::repository::RoundRepository;
use crate::config::LotteryConfig;
use crate::workflows::repository::RepositoryError;

/// Runs capacity-bounded, exactly-once draws over lottery rounds.
///
/// The random source is owned by the engine so tests and rehearsals can pin
/// it with a seed. Draws and entries on one round are serialized through a
/// per-round lock, and the repository's compare-and-set commit guards against
/// writers outside this process.
pub struct RoundLotteryEngine<R, G = StdRng> {
    repository: Arc<R>,
    rng: Mutex<G>,
    locks: RoundLocks,
}

impl<R> RoundLotteryEngine<R, StdRng>
where
    R: RoundRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_rng(repository, StdRng::from_entropy())
    }

    pub fn with_seed(repository: Arc<R>, seed: u64) -> Self {
        Self::with_rng(repository, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(repository: Arc<R>, config: &LotteryConfig) -> Self {
        match config.draw_seed {
            Some(seed) => Self::with_seed(repository, seed),
            None => Self::new(repository),
        }
    }
}

impl<R, G> RoundLotteryEngine<R, G>
where
    R: RoundRepository + 'static,
    G: Rng + Send,
{
    pub fn with_rng(repository: Arc<R>, rng: G) -> Self {
        Self {
            repository,
            rng: Mutex::new(rng),
            locks: RoundLocks::default(),
        }
    }

    /// All rounds in registration order.
    pub fn list_rounds(&self) -> Result<Vec<LotteryRound>, LotteryError> {
        Ok(self.repository.load_rounds()?)
    }

    pub fn round(&self, round_id: RoundId) -> Result<LotteryRound, LotteryError> {
        self.repository
            .fetch_round(round_id)?
            .ok_or(LotteryError::RoundNotFound(round_id))
    }

    /// Validate and register a new, undrawn round.
    pub fn add_round(&self, request: NewRound) -> Result<RoundId, LotteryError> {
        let round = round_from_request(request).map_err(|err| {
            warn!(error = %err, "rejected lottery round");
            err
        })?;
        let stored = self.repository.insert_round(round)?;
        info!(
            round_id = %stored.id,
            name = %stored.name,
            winner_count = stored.winner_count,
            "lottery round registered"
        );
        Ok(stored.id)
    }

    /// Enter a student into an undrawn round.
    pub fn enter(
        &self,
        round_id: RoundId,
        entry: ApplicantEntry,
    ) -> Result<LotteryRound, LotteryError> {
        self.locks.with_round(round_id, || -> Result<LotteryRound, LotteryError> {
            let mut round = self.round(round_id)?;
            if round.is_drawn {
                return Err(LotteryError::AlreadyDrawn { round_id });
            }

            apply_entry(&mut round.applicants, entry)?;
            self.repository
                .save_applicants(round_id, &round.applicants)
                .map_err(|err| conflict_as_drawn(err, round_id))?;

            Ok(round)
        })
    }

    /// Draw winners for a round. A round is drawn at most once; later calls
    /// fail with [`LotteryError::AlreadyDrawn`] and change nothing.
    pub fn draw(&self, round_id: RoundId) -> Result<DrawResult, LotteryError> {
        self.locks.with_round(round_id, || self.draw_locked(round_id))
    }

    fn draw_locked(&self, round_id: RoundId) -> Result<DrawResult, LotteryError> {
        let round = self.round(round_id)?;
        if round.is_drawn {
            warn!(%round_id, "draw requested for a round that is already drawn");
            return Err(LotteryError::AlreadyDrawn { round_id });
        }
        if round.applicants.is_empty() {
            warn!(%round_id, "draw requested for a round without applicants");
            return Err(LotteryError::EmptyPool {
                round_id,
                winner_count: round.winner_count,
            });
        }

        let drawn = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            draw_round(&round, &mut *rng)
        };

        self.repository
            .commit_draw(&drawn)
            .map_err(|err| conflict_as_drawn(err, round_id))?;

        let winners: Vec<_> = drawn.winners().into_iter().cloned().collect();
        info!(
            %round_id,
            pool_size = drawn.applicants.len(),
            winners = winners.len(),
            "lottery round drawn"
        );

        // The draw is committed at this point, so a failed reload only
        // drops the listing.
        let rounds = match self.repository.load_rounds() {
            Ok(rounds) => Some(rounds),
            Err(err) => {
                warn!(%round_id, error = %err, "draw committed but round listing reload failed");
                None
            }
        };

        Ok(DrawResult {
            round: drawn,
            winners,
            rounds,
        })
    }

    #[cfg(test)]
    pub(crate) fn tracked_locks(&self) -> usize {
        self.locks.tracked()
    }
}

fn conflict_as_drawn(err: RepositoryError, round_id: RoundId) -> LotteryError {
    match err {
        RepositoryError::Conflict => LotteryError::AlreadyDrawn { round_id },
        RepositoryError::NotFound => LotteryError::RoundNotFound(round_id),
        other => LotteryError::Storage(other),
    }
}

/// Error raised by the lottery engine.
#[derive(Debug, thiserror::Error)]
pub enum LotteryError {
    #[error(transparent)]
    Validation(#[from] RoundValidationError),
    #[error("lottery round {0} not found")]
    RoundNotFound(RoundId),
    #[error("lottery round {round_id} has already been drawn")]
    AlreadyDrawn { round_id: RoundId },
    #[error("lottery round {round_id} has no applicants to draw {winner_count} winner(s) from")]
    EmptyPool { round_id: RoundId, winner_count: u32 },
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}
