use super::domain::{Applicant, LotteryRound, RoundId};
use crate::workflows::repository::RepositoryError;

/// Storage abstraction for lottery rounds.
pub trait RoundRepository: Send + Sync {
    /// All rounds in registration order.
    fn load_rounds(&self) -> Result<Vec<LotteryRound>, RepositoryError>;

    fn fetch_round(&self, id: RoundId) -> Result<Option<LotteryRound>, RepositoryError>;

    /// Store a new round and return it with its assigned id.
    fn insert_round(&self, round: LotteryRound) -> Result<LotteryRound, RepositoryError>;

    /// Replace the applicant pool of an undrawn round. Must fail with
    /// `Conflict` when the stored round is already drawn.
    fn save_applicants(&self, id: RoundId, applicants: &[Applicant])
        -> Result<(), RepositoryError>;

    /// Persist `is_drawn` and every applicant status as one unit.
    ///
    /// Implementations must treat this as a compare-and-set on the stored
    /// `is_drawn` flag: if the stored round is already drawn, nothing is
    /// written and `Conflict` is returned.
    fn commit_draw(&self, round: &LotteryRound) -> Result<(), RepositoryError>;
}
