use rand::seq::SliceRandom;
use rand::Rng;

use super::domain::{ApplicantStatus, LotteryRound};

/// Produce the drawn copy of `round`.
///
/// A uniform permutation of the pool is taken (Fisher-Yates via
/// `SliceRandom::shuffle`), every applicant is reset to `Lost`, and the first
/// `winner_slots()` positions of the permutation are marked `Won`. Applicants
/// keep their insertion order in the returned round.
pub(crate) fn draw_round<G>(round: &LotteryRound, rng: &mut G) -> LotteryRound
where
    G: Rng + ?Sized,
{
    let mut drawn = round.clone();

    let mut order: Vec<usize> = (0..drawn.applicants.len()).collect();
    order.shuffle(rng);

    for applicant in &mut drawn.applicants {
        applicant.status = ApplicantStatus::Lost;
    }
    for &index in order.iter().take(drawn.winner_slots()) {
        drawn.applicants[index].status = ApplicantStatus::Won;
    }

    drawn.is_drawn = true;
    drawn
}
