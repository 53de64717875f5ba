//! Prize lottery rounds and their one-time draw.

pub mod domain;
mod draw;
mod intake;
mod locks;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Applicant, ApplicantEntry, ApplicantStatus, DrawResult, LotteryRound, NewRound, Period,
    RoundField, RoundId, RoundSummary,
};
pub use intake::RoundValidationError;
pub use repository::RoundRepository;
pub use router::lottery_router;
pub use service::{LotteryError, RoundLotteryEngine};
